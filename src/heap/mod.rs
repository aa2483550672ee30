//! Priority queues.

pub mod binary;

pub use binary::{BinaryHeap, HeapOrder};
