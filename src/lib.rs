//! # `plinth` - Classical Data-Structure Toolkit
//!
//! A toolkit of the four container/traversal abstractions that classical
//! algorithms keep reaching for: adjacency graphs, indexed binary heaps,
//! open-addressing hash tables, and red-black trees. Each component is an
//! independent leaf usable standalone; they compose only at the call site of
//! higher-level routines (Dijkstra = graph + heap).
//!
//! ## Design Guarantees
//!
//! ### Ownership
//! - **Caller-owned**: every structure is owned exclusively by its caller and
//!   mutated through `&mut self`; nothing persists beyond the invocation that
//!   constructs it.
//! - **Explicit links**: tree and graph topology is expressed as integer
//!   indices into caller-visible arenas, never shared mutable ownership.
//!   Rotations, fixups, and traversals are explicit loops, so call-stack
//!   depth never depends on input size.
//!
//! ### Error Handling
//! - **Recoverable by construction**: every failure ([`Error::InvalidVertex`],
//!   [`Error::EmptyHeap`], [`Error::KeyNotFound`], [`Error::InvalidKey`]) is
//!   a local condition returned to the caller; operations are deterministic
//!   and safe to re-invoke after correcting the input.
//! - **Absence is not an error**: plain lookups (`get`, `peek`) return
//!   `Option` like the standard library containers they mirror.
//!
//! ### Concurrency
//! - **None inside**: no component performs internal synchronization. A
//!   multi-threaded host must serialize mutating access; shared reads of a
//!   frozen structure are fine.
//!
//! ## Components
//!
//! 1. **[`AdjacencyGraph`]**: directed/undirected adjacency lists with
//!    optional `Copy` edge weights and dynamic edge insertion/removal.
//! 2. **[`BinaryHeap`]**: min/max priority queue over `(key, priority)` pairs
//!    with O(log n) `decrease_key` through a key-to-slot position table.
//! 3. **[`HashTable`]**: open addressing with linear probing, tombstone
//!    deletion, and load-factor-driven rehashing.
//! 4. **[`RedBlackTree`]**: ordered map in an index arena with iterative
//!    rebalancing and a lazy, restartable in-order iterator.
//! 5. **Traversals** ([`Bfs`], [`Dfs`], [`dijkstra`], [`topological_sort`]):
//!    the composition layer over [`AdjacencyGraph`].
//!
//! ## Example
//!
//! ```rust
//! use plinth::{AdjacencyGraph, dijkstra};
//!
//! let mut graph = AdjacencyGraph::undirected();
//! let a = graph.add_vertex();
//! let b = graph.add_vertex();
//! let c = graph.add_vertex();
//! graph.add_edge(a, b, 2u32)?;
//! graph.add_edge(b, c, 3u32)?;
//! graph.add_edge(a, c, 10u32)?;
//!
//! let dist = dijkstra(&graph, a)?;
//! assert_eq!(dist[c.index()], Some(5)); // a -> b -> c beats the direct edge
//! # Ok::<(), plinth::Error>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod error;
pub mod graph;
pub mod hash;
pub mod heap;
pub mod tree;

pub use error::{Error, Result};
pub use graph::{
    dijkstra, topological_sort, AdjacencyGraph, Bfs, Dfs, GraphStatistics, VertexId,
};
pub use hash::HashTable;
pub use heap::{BinaryHeap, HeapOrder};
pub use tree::{InOrderIter, RedBlackTree};
