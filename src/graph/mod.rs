//! Graph representation and traversal algorithms.
//!
//! Graph support is organized in two layers:
//! - `adjacency`: the [`AdjacencyGraph`] representation itself
//! - `algorithms`: traversal iterators and shortest-path routines that
//!   compose the graph with the other toolkit components at the call site

pub mod adjacency;
pub mod algorithms;

pub use adjacency::{AdjacencyGraph, GraphStatistics, VertexId};
pub use algorithms::{dijkstra, topological_sort, Bfs, Dfs};
