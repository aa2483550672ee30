//! Ordered associative containers.

pub mod red_black;

pub use red_black::{InOrderIter, RedBlackTree};
