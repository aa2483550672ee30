use plinth::HashTable;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Operation {
    Insert(u8, u16),
    Remove(u8),
    Get(u8),
}

proptest! {
    #[test]
    fn test_hash_table_matches_std_map(ops in proptest::collection::vec(
        prop_oneof![
            (any::<u8>(), any::<u16>()).prop_map(|(k, v)| Operation::Insert(k, v)),
            any::<u8>().prop_map(Operation::Remove),
            any::<u8>().prop_map(Operation::Get),
        ],
        1..200
    )) {
        let mut std_map = HashMap::new();
        let mut table = HashTable::new();

        for op in ops {
            match op {
                Operation::Insert(k, v) => {
                    prop_assert_eq!(std_map.insert(k, v), table.insert(k, v));
                }
                Operation::Remove(k) => {
                    prop_assert_eq!(std_map.remove(&k), table.remove(&k));
                }
                Operation::Get(k) => {
                    prop_assert_eq!(std_map.get(&k), table.get(&k));
                }
            }
        }

        prop_assert_eq!(table.len(), std_map.len());
        let mut table_pairs: Vec<(u8, u16)> = table.iter().map(|(&k, &v)| (k, v)).collect();
        let mut std_pairs: Vec<(u8, u16)> = std_map.iter().map(|(&k, &v)| (k, v)).collect();
        table_pairs.sort_unstable();
        std_pairs.sort_unstable();
        prop_assert_eq!(table_pairs, std_pairs);
    }
}
