//! Error types shared across the toolkit.
//!
//! Every error here is a local, recoverable condition: operations are
//! deterministic, so the caller can correct the input and re-invoke.

use crate::graph::VertexId;

/// Errors returned by toolkit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An operation referenced a vertex that does not exist in the graph.
    #[error("vertex {0} does not exist in this graph")]
    InvalidVertex(VertexId),

    /// `extract_top` was called on an empty heap.
    #[error("cannot extract from an empty heap")]
    EmptyHeap,

    /// An operation referenced a key that is not present.
    #[error("key not found")]
    KeyNotFound,

    /// A key argument violated an operation's precondition.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
