//! `BinaryHeap` — an indexed priority queue implemented with a binary heap.
//!
//! The heap is backed by a flat `Vec` storing a complete binary tree, with a
//! side table mapping each key to its current slot so `decrease_key` can find
//! the entry to re-prioritize in O(1) before sifting. Min and max orderings
//! share one implementation; the variant is chosen at construction.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `insert` | \(O(\log n)\) | Sift-up from the last slot |
//! | `extract_top` | \(O(\log n)\) | Swap with last, sift-down |
//! | `decrease_key` | \(O(\log n)\) | Position lookup is O(1) |
//! | `peek` | \(O(1)\) | |

use core::fmt;
use core::hash::Hash;
use std::collections::HashMap;

use crate::error::{Error, Result};

/// Ordering variant of a [`BinaryHeap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    /// The top element has the smallest priority.
    Min,
    /// The top element has the largest priority.
    Max,
}

/// An indexed binary heap over `(key, priority)` pairs.
///
/// Keys are unique; inserting a key twice is an error because the position
/// table can only track one slot per key. Priorities only need `PartialOrd`,
/// so floating-point priorities work; incomparable pairs are treated as
/// already in order.
pub struct BinaryHeap<K, P> {
    entries: Vec<(K, P)>,
    positions: HashMap<K, usize>,
    order: HeapOrder,
}

impl<K, P> BinaryHeap<K, P> {
    /// Creates an empty min-heap.
    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    /// Creates an empty max-heap.
    pub fn max() -> Self {
        Self::new(HeapOrder::Max)
    }

    /// Creates an empty heap with the given ordering.
    pub fn new(order: HeapOrder) -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            order,
        }
    }

    /// Creates an empty heap with the given ordering and capacity.
    pub fn with_capacity(order: HeapOrder, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            order,
        }
    }

    /// Returns the ordering variant of this heap.
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the heap is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the top `(key, priority)` pair without removing it.
    pub fn peek(&self) -> Option<(&K, &P)> {
        self.entries.first().map(|(k, p)| (k, p))
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }
}

impl<K, P> BinaryHeap<K, P>
where
    K: Eq + Hash + Clone,
    P: PartialOrd,
{
    /// Inserts a key with a priority.
    ///
    /// # Errors
    /// [`Error::InvalidKey`] if the key is already present; use
    /// [`BinaryHeap::decrease_key`] to re-prioritize an existing key.
    pub fn insert(&mut self, key: K, priority: P) -> Result<()> {
        if self.positions.contains_key(&key) {
            return Err(Error::InvalidKey("key is already present in the heap"));
        }
        let slot = self.entries.len();
        self.positions.insert(key.clone(), slot);
        self.entries.push((key, priority));
        self.sift_up(slot);
        Ok(())
    }

    /// Removes and returns the top `(key, priority)` pair.
    ///
    /// # Errors
    /// [`Error::EmptyHeap`] if the heap is empty.
    pub fn extract_top(&mut self) -> Result<(K, P)> {
        if self.entries.is_empty() {
            return Err(Error::EmptyHeap);
        }
        let last = self.entries.len() - 1;
        self.swap_entries(0, last);
        let (key, priority) = self.entries.pop().expect("checked non-empty");
        self.positions.remove(&key);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok((key, priority))
    }

    /// Re-prioritizes an existing key towards the top of the heap.
    ///
    /// For a min-heap the new priority must not exceed the old one; for a
    /// max-heap it must not fall below it (classical `decrease_key`, with the
    /// improvement direction following the heap's order).
    ///
    /// # Errors
    /// [`Error::KeyNotFound`] if the key is absent, [`Error::InvalidKey`] if
    /// the new priority moves away from the top.
    pub fn decrease_key(&mut self, key: &K, new_priority: P) -> Result<()> {
        let slot = *self.positions.get(key).ok_or(Error::KeyNotFound)?;
        let current = &self.entries[slot].1;
        if self.ranks_before(current, &new_priority) {
            return Err(Error::InvalidKey(
                "new priority moves away from the top of the heap",
            ));
        }
        self.entries[slot].1 = new_priority;
        self.sift_up(slot);
        Ok(())
    }

    /// Returns `true` if the key currently has an entry in the heap.
    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the priority currently associated with a key.
    pub fn priority(&self, key: &K) -> Option<&P> {
        self.positions.get(key).map(|&slot| &self.entries[slot].1)
    }

    /// Whether priority `a` belongs strictly above `b` in this heap's order.
    fn ranks_before(&self, a: &P, b: &P) -> bool {
        match self.order {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }

    fn slot_before(&self, a: usize, b: usize) -> bool {
        self.ranks_before(&self.entries[a].1, &self.entries[b].1)
    }

    fn sift_up(&mut self, mut slot: usize) {
        while slot > 0 {
            let parent = (slot - 1) / 2;
            if self.slot_before(slot, parent) {
                self.swap_entries(slot, parent);
                slot = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut slot: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * slot + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            let mut best = left;
            if right < len && self.slot_before(right, left) {
                best = right;
            }
            if self.slot_before(best, slot) {
                self.swap_entries(slot, best);
                slot = best;
            } else {
                break;
            }
        }
    }

    fn swap_entries(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.positions.insert(self.entries[a].0.clone(), a);
        self.positions.insert(self.entries[b].0.clone(), b);
    }
}

impl<K, P> Default for BinaryHeap<K, P> {
    fn default() -> Self {
        Self::min()
    }
}

impl<K, P> fmt::Debug for BinaryHeap<K, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("len", &self.len())
            .field("order", &self.order)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_heap_extracts_in_ascending_priority() {
        let mut heap = BinaryHeap::min();
        for (key, priority) in [("a", 5), ("b", 3), ("c", 8), ("d", 1)] {
            heap.insert(key, priority).unwrap();
        }

        let mut drained = Vec::new();
        while !heap.is_empty() {
            drained.push(heap.extract_top().unwrap().1);
        }
        assert_eq!(drained, vec![1, 3, 5, 8]);
    }

    #[test]
    fn max_heap_extracts_in_descending_priority() {
        let mut heap = BinaryHeap::max();
        for (key, priority) in [(1u32, 5), (2, 3), (3, 8), (4, 1)] {
            heap.insert(key, priority).unwrap();
        }

        let mut drained = Vec::new();
        while let Ok((_, p)) = heap.extract_top() {
            drained.push(p);
        }
        assert_eq!(drained, vec![8, 5, 3, 1]);
    }

    #[test]
    fn extract_top_on_empty_heap_fails() {
        let mut heap: BinaryHeap<u32, u32> = BinaryHeap::min();
        assert_eq!(heap.extract_top(), Err(Error::EmptyHeap));
        heap.insert(1, 1).unwrap();
        heap.extract_top().unwrap();
        assert_eq!(heap.extract_top(), Err(Error::EmptyHeap));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let mut heap = BinaryHeap::min();
        heap.insert("x", 1).unwrap();
        assert!(matches!(
            heap.insert("x", 2),
            Err(Error::InvalidKey(_))
        ));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn decrease_key_reorders_extraction() {
        let mut heap = BinaryHeap::min();
        heap.insert("slow", 10).unwrap();
        heap.insert("fast", 2).unwrap();
        heap.decrease_key(&"slow", 1).unwrap();

        assert_eq!(heap.extract_top().unwrap(), ("slow", 1));
        assert_eq!(heap.extract_top().unwrap(), ("fast", 2));
    }

    #[test]
    fn decrease_key_rejects_worse_priorities() {
        let mut heap = BinaryHeap::min();
        heap.insert("x", 5).unwrap();
        assert!(matches!(
            heap.decrease_key(&"x", 9),
            Err(Error::InvalidKey(_))
        ));
        // Equal priority is a no-op, not an error.
        heap.decrease_key(&"x", 5).unwrap();
        assert_eq!(heap.extract_top().unwrap(), ("x", 5));
    }

    #[test]
    fn decrease_key_on_missing_key_fails() {
        let mut heap: BinaryHeap<&str, u32> = BinaryHeap::min();
        assert_eq!(heap.decrease_key(&"ghost", 1), Err(Error::KeyNotFound));
    }

    #[test]
    fn increase_key_on_max_heap_is_the_improvement_direction() {
        let mut heap = BinaryHeap::max();
        heap.insert("x", 3).unwrap();
        heap.insert("y", 7).unwrap();
        heap.decrease_key(&"x", 9).unwrap();
        assert_eq!(heap.extract_top().unwrap(), ("x", 9));
        assert!(matches!(
            heap.decrease_key(&"y", 1),
            Err(Error::InvalidKey(_))
        ));
    }

    #[test]
    fn positions_stay_consistent_across_mutation() {
        let mut heap = BinaryHeap::min();
        for i in 0..50u32 {
            heap.insert(i, (i * 7919) % 101).unwrap();
        }
        for i in (0..50).step_by(3) {
            let current = *heap.priority(&i).unwrap();
            if current > 0 {
                heap.decrease_key(&i, current - 1).unwrap();
            }
        }

        let mut last: Option<u32> = None;
        while !heap.is_empty() {
            let (k, p) = heap.extract_top().unwrap();
            assert!(!heap.contains(&k));
            if let Some(prev) = last {
                assert!(prev <= p);
            }
            last = Some(p);
        }
    }

    #[test]
    fn peek_does_not_remove() {
        let mut heap = BinaryHeap::min();
        heap.insert("a", 2).unwrap();
        heap.insert("b", 1).unwrap();
        assert_eq!(heap.peek(), Some((&"b", &1)));
        assert_eq!(heap.len(), 2);
    }
}
