//! Hash-based associative containers.

pub mod table;

pub use table::HashTable;
