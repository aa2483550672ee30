//! A dynamic adjacency-list graph.
//!
//! This representation prioritizes **dynamic updates** (edge insertion and
//! deletion) over compressed storage. Both directed and undirected graphs are
//! supported by the same type; undirected graphs mirror every edge into both
//! endpoint adjacency lists. Weights are an arbitrary `Copy` payload; use
//! `W = ()` for unweighted graphs.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_vertex` | \(O(1)\) amortized | Appends to the adjacency vector |
//! | `add_edge` | \(O(\text{degree})\) | Checks for an existing edge first |
//! | `remove_edge` | \(O(\text{degree})\) | Linear scan of the adjacency list |
//! | `neighbors` | \(O(1)\) | Returns a borrowing iterator |
//! | `degree` | \(O(1)\) | Returns `Vec::len` |

use core::fmt;

use crate::error::{Error, Result};

/// An opaque identifier for a vertex of an [`AdjacencyGraph`].
///
/// Identifiers are dense indices handed out by [`AdjacencyGraph::add_vertex`]
/// and are only meaningful for the graph that created them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(u32);

impl VertexId {
    /// Builds an identifier from a dense index.
    ///
    /// Identifiers only have meaning for the graph whose `add_vertex` handed
    /// out that index; operations on other graphs report `InvalidVertex`.
    pub fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize);
        Self(index as u32)
    }

    /// Returns the dense index behind this identifier.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// A dynamic adjacency-list graph with optional edge weights.
///
/// The graph is built once by the caller and read shared by the traversal
/// algorithms in [`crate::graph::algorithms`]. There is no internal
/// synchronization; a multi-threaded host must serialize mutating access.
pub struct AdjacencyGraph<W = ()> {
    adjacency: Vec<Vec<(VertexId, W)>>,
    edge_count: usize,
    directed: bool,
}

impl<W> AdjacencyGraph<W> {
    /// Creates an empty directed graph.
    pub fn directed() -> Self {
        Self {
            adjacency: Vec::new(),
            edge_count: 0,
            directed: true,
        }
    }

    /// Creates an empty undirected graph.
    pub fn undirected() -> Self {
        Self {
            adjacency: Vec::new(),
            edge_count: 0,
            directed: false,
        }
    }

    /// Creates an empty directed graph with room for `vertices` vertices.
    pub fn directed_with_capacity(vertices: usize) -> Self {
        Self {
            adjacency: Vec::with_capacity(vertices),
            edge_count: 0,
            directed: true,
        }
    }

    /// Creates an empty undirected graph with room for `vertices` vertices.
    pub fn undirected_with_capacity(vertices: usize) -> Self {
        Self {
            adjacency: Vec::with_capacity(vertices),
            edge_count: 0,
            directed: false,
        }
    }

    /// Returns `true` if edges are directed.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Adds a vertex and returns its identifier.
    pub fn add_vertex(&mut self) -> VertexId {
        let id = VertexId::new(self.adjacency.len());
        self.adjacency.push(Vec::new());
        id
    }

    /// Returns the number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of logical edges.
    ///
    /// An undirected edge counts once even though it is stored in both
    /// endpoint adjacency lists.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Iterates over all vertex identifiers.
    pub fn vertices(&self) -> impl Iterator<Item = VertexId> {
        (0..self.adjacency.len()).map(VertexId::new)
    }

    /// Returns the degree of `v` (out-degree for directed graphs).
    pub fn degree(&self, v: VertexId) -> Result<usize> {
        self.check_vertex(v)?;
        Ok(self.adjacency[v.index()].len())
    }

    pub(crate) fn check_vertex(&self, v: VertexId) -> Result<()> {
        if v.index() < self.adjacency.len() {
            Ok(())
        } else {
            Err(Error::InvalidVertex(v))
        }
    }
}

impl<W: Copy> AdjacencyGraph<W> {
    /// Adds an edge from `u` to `v` with weight `w`.
    ///
    /// Re-adding an existing edge updates its weight instead of creating a
    /// parallel edge. For undirected graphs the edge is mirrored into both
    /// adjacency lists.
    ///
    /// # Errors
    /// [`Error::InvalidVertex`] if either endpoint is unknown.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId, w: W) -> Result<()> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        let fresh = self.set_half_edge(u, v, w);
        if !self.directed && u != v {
            self.set_half_edge(v, u, w);
        }
        if fresh {
            self.edge_count += 1;
        }
        Ok(())
    }

    /// Removes the edge from `u` to `v` if present.
    ///
    /// Returns `true` if an edge was removed. For undirected graphs both
    /// stored directions are removed.
    ///
    /// # Errors
    /// [`Error::InvalidVertex`] if either endpoint is unknown.
    pub fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;

        let removed = self.clear_half_edge(u, v);
        if !self.directed && u != v {
            self.clear_half_edge(v, u);
        }
        if removed {
            self.edge_count -= 1;
        }
        Ok(removed)
    }

    /// Checks whether an edge from `u` to `v` exists.
    ///
    /// # Errors
    /// [`Error::InvalidVertex`] if either endpoint is unknown.
    pub fn has_edge(&self, u: VertexId, v: VertexId) -> Result<bool> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.adjacency[u.index()].iter().any(|&(t, _)| t == v))
    }

    /// Returns the weight of the edge from `u` to `v`, if present.
    ///
    /// # Errors
    /// [`Error::InvalidVertex`] if either endpoint is unknown.
    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> Result<Option<W>> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        Ok(self.adjacency[u.index()]
            .iter()
            .find(|&&(t, _)| t == v)
            .map(|&(_, w)| w))
    }

    /// Returns an iterator over the neighbors of `v` and the weights of the
    /// connecting edges, in insertion order.
    ///
    /// # Errors
    /// [`Error::InvalidVertex`] if `v` is unknown.
    pub fn neighbors(&self, v: VertexId) -> Result<impl Iterator<Item = (VertexId, W)> + '_> {
        self.check_vertex(v)?;
        Ok(self.adjacency[v.index()].iter().copied())
    }

    /// Computes a degree summary of the graph.
    pub fn statistics(&self) -> GraphStatistics {
        let vertex_count = self.vertex_count();
        let mut degrees: Vec<usize> = self.adjacency.iter().map(Vec::len).collect();
        degrees.sort_unstable();

        let (min_degree, max_degree) = match degrees.as_slice() {
            [] => (0, 0),
            [first, .., last] => (*first, *last),
            [only] => (*only, *only),
        };
        let median_degree = if degrees.is_empty() {
            0
        } else if degrees.len() % 2 == 0 {
            (degrees[degrees.len() / 2 - 1] + degrees[degrees.len() / 2]) / 2
        } else {
            degrees[degrees.len() / 2]
        };
        let stored: usize = degrees.iter().sum();

        GraphStatistics {
            vertex_count,
            edge_count: self.edge_count,
            min_degree,
            max_degree,
            median_degree,
            average_degree: if vertex_count == 0 {
                0.0
            } else {
                stored as f64 / vertex_count as f64
            },
        }
    }

    /// Inserts or updates `from -> to`; returns `true` if the edge is new.
    fn set_half_edge(&mut self, from: VertexId, to: VertexId, w: W) -> bool {
        let list = &mut self.adjacency[from.index()];
        if let Some(slot) = list.iter_mut().find(|(t, _)| *t == to) {
            slot.1 = w;
            false
        } else {
            list.push((to, w));
            true
        }
    }

    /// Removes `from -> to`; returns `true` if it was present.
    fn clear_half_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        let list = &mut self.adjacency[from.index()];
        let before = list.len();
        list.retain(|&(t, _)| t != to);
        before != list.len()
    }
}

impl AdjacencyGraph<()> {
    /// Adds an unweighted edge from `u` to `v`.
    ///
    /// # Errors
    /// [`Error::InvalidVertex`] if either endpoint is unknown.
    pub fn add_unweighted_edge(&mut self, u: VertexId, v: VertexId) -> Result<()> {
        self.add_edge(u, v, ())
    }
}

impl<W> Default for AdjacencyGraph<W> {
    fn default() -> Self {
        Self::directed()
    }
}

impl<W> fmt::Debug for AdjacencyGraph<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdjacencyGraph")
            .field("vertices", &self.vertex_count())
            .field("edges", &self.edge_count)
            .field("directed", &self.directed)
            .finish()
    }
}

/// A degree summary of a graph.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphStatistics {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of logical edges.
    pub edge_count: usize,
    /// Minimum degree over all vertices.
    pub min_degree: usize,
    /// Maximum degree over all vertices.
    pub max_degree: usize,
    /// Median degree over all vertices.
    pub median_degree: usize,
    /// Average degree (stored adjacency entries divided by vertex count).
    pub average_degree: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_vertices<W>(graph: &mut AdjacencyGraph<W>) -> (VertexId, VertexId, VertexId) {
        (graph.add_vertex(), graph.add_vertex(), graph.add_vertex())
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut graph = AdjacencyGraph::directed();
        let (a, b, _) = three_vertices(&mut graph);
        graph.add_edge(a, b, 3).unwrap();

        assert!(graph.has_edge(a, b).unwrap());
        assert!(!graph.has_edge(b, a).unwrap());
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(a, b).unwrap(), Some(3));
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut graph = AdjacencyGraph::undirected();
        let (a, b, c) = three_vertices(&mut graph);
        graph.add_edge(a, b, 1.5).unwrap();
        graph.add_edge(b, c, 2.5).unwrap();

        assert!(graph.has_edge(a, b).unwrap());
        assert!(graph.has_edge(b, a).unwrap());
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(b).unwrap(), 2);

        let nbrs: Vec<_> = graph.neighbors(b).unwrap().collect();
        assert_eq!(nbrs, vec![(a, 1.5), (c, 2.5)]);
    }

    #[test]
    fn readding_an_edge_updates_the_weight() {
        let mut graph = AdjacencyGraph::directed();
        let (a, b, _) = three_vertices(&mut graph);
        graph.add_edge(a, b, 1).unwrap();
        graph.add_edge(a, b, 9).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_weight(a, b).unwrap(), Some(9));
    }

    #[test]
    fn remove_edge_reports_presence() {
        let mut graph = AdjacencyGraph::undirected();
        let (a, b, c) = three_vertices(&mut graph);
        graph.add_edge(a, b, ()).unwrap();

        assert!(graph.remove_edge(a, b).unwrap());
        assert!(!graph.remove_edge(a, c).unwrap());
        assert!(!graph.has_edge(b, a).unwrap());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn unknown_vertices_are_rejected() {
        let mut graph = AdjacencyGraph::<u32>::directed();
        let a = graph.add_vertex();
        let ghost = VertexId::new(7);

        assert_eq!(graph.add_edge(a, ghost, 1), Err(Error::InvalidVertex(ghost)));
        assert_eq!(graph.degree(ghost), Err(Error::InvalidVertex(ghost)));
        assert!(graph.neighbors(ghost).is_err());
    }

    #[test]
    fn self_loop_on_undirected_graph_is_stored_once() {
        let mut graph = AdjacencyGraph::undirected();
        let a = graph.add_vertex();
        graph.add_edge(a, a, 4).unwrap();

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(a).unwrap(), 1);
        assert!(graph.remove_edge(a, a).unwrap());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn statistics_summarize_degrees() {
        let mut graph = AdjacencyGraph::directed();
        let ids: Vec<_> = (0..4).map(|_| graph.add_vertex()).collect();
        graph.add_edge(ids[0], ids[1], ()).unwrap();
        graph.add_edge(ids[0], ids[2], ()).unwrap();
        graph.add_edge(ids[0], ids[3], ()).unwrap();
        graph.add_edge(ids[1], ids[2], ()).unwrap();

        let stats = graph.statistics();
        assert_eq!(stats.vertex_count, 4);
        assert_eq!(stats.edge_count, 4);
        assert_eq!(stats.min_degree, 0);
        assert_eq!(stats.max_degree, 3);
        assert_eq!(stats.median_degree, 0); // sorted degrees: 0,0,1,3
        assert!((stats.average_degree - 1.0).abs() < f64::EPSILON);
    }
}
