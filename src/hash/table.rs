//! `HashTable` — an open-addressing hash map with linear probing.
//!
//! Collision policy and sizing follow the usual open-addressing recipe:
//! - **Power-of-two capacity** so the probe index is a mask, not a modulo
//! - **Linear probing** for cache-friendly probe sequences
//! - **Tombstone deletion** so probe chains over removed entries stay intact
//! - **Load-factor bound of 7/8** counting tombstones, guaranteeing at least
//!   one empty slot and therefore probe termination
//!
//! Resizing rehashes every live entry into a fresh slot array and drops all
//! tombstones, keeping operations amortized O(1) under the load bound.

use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::hash_map::RandomState;

/// Minimum number of slots; keeps small tables from rehashing immediately.
const MIN_SLOTS: usize = 8;

enum Slot<K, V> {
    Empty,
    Tombstone,
    Occupied { key: K, value: V },
}

impl<K, V> Slot<K, V> {
    fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}

/// An associative container mapping unique keys to values.
///
/// The default hasher is the standard library's SipHash [`RandomState`]; a
/// custom [`BuildHasher`] can be supplied for deterministic layouts.
pub struct HashTable<K, V, S = RandomState> {
    slots: Vec<Slot<K, V>>,
    /// Live entries.
    len: usize,
    /// Live entries plus tombstones; drives the resize decision.
    filled: usize,
    hash_builder: S,
}

impl<K: Eq + Hash, V> HashTable<K, V, RandomState> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty table with room for at least `capacity` entries
    /// before the first rehash.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates an empty table with the given capacity and hasher.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        // Size so `capacity` entries fit under the 7/8 bound.
        let slots = (capacity.saturating_mul(8) / 7)
            .next_power_of_two()
            .max(MIN_SLOTS);
        Self {
            slots: (0..slots).map(|_| Slot::Empty).collect(),
            len: 0,
            filled: 0,
            hash_builder,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current slot count.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a key-value pair, returning the previous value for the key
    /// if one was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if (self.filled + 1) * 8 > self.slots.len() * 7 {
            self.resize();
        }

        let mask = self.slots.len() - 1;
        let mut index = self.hash_of(&key) & mask;
        let mut first_tombstone = None;

        loop {
            match &mut self.slots[index] {
                Slot::Occupied { key: k, value: v } if *k == key => {
                    return Some(core::mem::replace(v, value));
                }
                Slot::Occupied { .. } => {}
                Slot::Tombstone => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Slot::Empty => {
                    let target = match first_tombstone {
                        // Reusing a tombstone does not raise `filled`.
                        Some(t) => t,
                        None => {
                            self.filled += 1;
                            index
                        }
                    };
                    self.slots[target] = Slot::Occupied { key, value };
                    self.len += 1;
                    return None;
                }
            }
            index = (index + 1) & mask;
        }
    }

    /// Returns a reference to the value associated with `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_slot(key)?;
        match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => unreachable!("find_slot only returns occupied slots"),
        }
    }

    /// Returns a mutable reference to the value associated with `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_slot(key)?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => unreachable!("find_slot only returns occupied slots"),
        }
    }

    /// Returns `true` if the table contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find_slot(key).is_some()
    }

    /// Removes `key` from the table, returning its value if present.
    ///
    /// The slot becomes a tombstone so longer probe chains passing through
    /// it keep working.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.find_slot(key)?;
        match core::mem::replace(&mut self.slots[index], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.len -= 1;
                Some(value)
            }
            _ => unreachable!("find_slot only returns occupied slots"),
        }
    }

    /// Iterates over all `(key, value)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: &self.slots,
            index: 0,
            remaining: self.len,
        }
    }

    /// Probes for the slot holding `key`; `None` if absent.
    fn find_slot<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mask = self.slots.len() - 1;
        let mut index = self.hash_of(key) & mask;
        loop {
            match &self.slots[index] {
                Slot::Occupied { key: k, .. } if k.borrow() == key => return Some(index),
                Slot::Empty => return None,
                _ => {}
            }
            index = (index + 1) & mask;
        }
    }

    fn hash_of<Q: Hash + ?Sized>(&self, key: &Q) -> usize {
        self.hash_builder.hash_one(key) as usize
    }

    /// Rehashes every live entry into a fresh slot array.
    ///
    /// Capacity doubles when the table is genuinely full; when the load is
    /// mostly tombstones the array is rebuilt at the same size instead.
    fn resize(&mut self) {
        let new_slots = if self.len >= self.slots.len() / 2 {
            self.slots.len() * 2
        } else {
            self.slots.len()
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(
            live = self.len,
            filled = self.filled,
            from = self.slots.len(),
            to = new_slots,
            "rehashing hash table"
        );

        let old = core::mem::replace(
            &mut self.slots,
            (0..new_slots).map(|_| Slot::Empty).collect(),
        );
        self.filled = self.len;

        let mask = new_slots - 1;
        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                let mut index = self.hash_of(&key) & mask;
                while !self.slots[index].is_empty() {
                    index = (index + 1) & mask;
                }
                self.slots[index] = Slot::Occupied { key, value };
            }
        }
    }
}

impl<K: Eq + Hash, V> Default for HashTable<K, V, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("len", &self.len)
            .field("capacity", &self.slots.len())
            .finish()
    }
}

/// Borrowing iterator over the entries of a [`HashTable`].
pub struct Iter<'a, K, V> {
    slots: &'a [Slot<K, V>],
    index: usize,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.slots.len() {
            let slot = &self.slots[self.index];
            self.index += 1;
            if let Slot::Occupied { key, value } = slot {
                self.remaining -= 1;
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_then_get_round_trips() {
        let mut table = HashTable::new();
        assert_eq!(table.insert("one", 1), None);
        assert_eq!(table.insert("two", 2), None);

        assert_eq!(table.get("one"), Some(&1));
        assert_eq!(table.get("two"), Some(&2));
        assert_eq!(table.get("three"), None);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn insert_replaces_and_returns_old_value() {
        let mut table = HashTable::new();
        table.insert(7u32, "a");
        assert_eq!(table.insert(7, "b"), Some("a"));
        assert_eq!(table.get(&7), Some(&"b"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn remove_then_get_misses() {
        let mut table = HashTable::new();
        table.insert("k", 1);
        assert_eq!(table.remove("k"), Some(1));
        assert_eq!(table.get("k"), None);
        assert_eq!(table.remove("k"), None);
        assert!(table.is_empty());
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut table = HashTable::with_capacity(4);
        let initial = table.capacity();
        for i in 0..1000u32 {
            table.insert(i, i * 2);
        }
        assert!(table.capacity() > initial);
        assert_eq!(table.len(), 1000);
        for i in 0..1000 {
            assert_eq!(table.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn probe_chains_survive_deletion() {
        // Interleave inserts and removes so lookups must cross tombstones.
        let mut table = HashTable::with_capacity(8);
        for i in 0..64u32 {
            table.insert(i, i);
        }
        for i in (0..64).step_by(2) {
            assert_eq!(table.remove(&i), Some(i));
        }
        for i in 0..64 {
            if i % 2 == 0 {
                assert_eq!(table.get(&i), None);
            } else {
                assert_eq!(table.get(&i), Some(&i));
            }
        }
        // Reinsert into tombstoned territory.
        for i in (0..64).step_by(2) {
            assert_eq!(table.insert(i, i + 100), None);
        }
        assert_eq!(table.len(), 64);
        assert_eq!(table.get(&0), Some(&100));
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut table = HashTable::new();
        table.insert("counter", 0);
        *table.get_mut("counter").unwrap() += 5;
        assert_eq!(table.get("counter"), Some(&5));
    }

    #[test]
    fn borrowed_key_lookup() {
        let mut table = HashTable::new();
        table.insert(String::from("owned"), 1);
        assert_eq!(table.get("owned"), Some(&1));
        assert!(table.contains_key("owned"));
        assert_eq!(table.remove("owned"), Some(1));
    }

    #[test]
    fn iter_visits_every_live_entry_once() {
        let mut table = HashTable::new();
        for i in 0..20u32 {
            table.insert(i, i);
        }
        table.remove(&3);
        table.remove(&17);

        let iter = table.iter();
        assert_eq!(iter.len(), 18);
        let mut seen: Vec<u32> = iter.map(|(&k, _)| k).collect();
        seen.sort_unstable();
        let expected: Vec<u32> = (0..20).filter(|i| *i != 3 && *i != 17).collect();
        assert_eq!(seen, expected);
    }
}
