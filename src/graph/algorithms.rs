//! Traversal iterators and shortest-path routines for [`AdjacencyGraph`].
//!
//! This module is the composition layer of the toolkit: the graph is read
//! shared while the algorithms bring their own working state. Traversal
//! strategies are interchangeable because both [`Bfs`] and [`Dfs`] are plain
//! `Iterator<Item = VertexId>` values over the same graph type; callers pick
//! a strategy by picking a constructor.

use core::ops::Add;
use std::collections::VecDeque;

use num_traits::Zero;

use crate::error::Result;
use crate::graph::adjacency::{AdjacencyGraph, VertexId};
use crate::heap::BinaryHeap;

/// An iterator yielding vertices in breadth-first order from a start vertex.
pub struct Bfs<'a, W> {
    graph: &'a AdjacencyGraph<W>,
    visited: Vec<bool>,
    queue: VecDeque<VertexId>,
}

impl<'a, W: Copy> Bfs<'a, W> {
    /// Creates a BFS iterator rooted at `start`.
    ///
    /// # Errors
    /// [`crate::Error::InvalidVertex`] if `start` is unknown.
    pub fn new(graph: &'a AdjacencyGraph<W>, start: VertexId) -> Result<Self> {
        graph.check_vertex(start)?;
        let mut visited = vec![false; graph.vertex_count()];
        visited[start.index()] = true;
        let mut queue = VecDeque::new();
        queue.push_back(start);
        Ok(Self {
            graph,
            visited,
            queue,
        })
    }
}

impl<W: Copy> Iterator for Bfs<'_, W> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;
        // Vertex ids were validated on entry, so neighbors cannot fail.
        for (v, _) in self.graph.neighbors(u).ok()? {
            if !self.visited[v.index()] {
                self.visited[v.index()] = true;
                self.queue.push_back(v);
            }
        }
        Some(u)
    }
}

/// An iterator yielding vertices in depth-first (preorder) order from a
/// start vertex.
pub struct Dfs<'a, W> {
    graph: &'a AdjacencyGraph<W>,
    visited: Vec<bool>,
    stack: Vec<VertexId>,
}

impl<'a, W: Copy> Dfs<'a, W> {
    /// Creates a DFS iterator rooted at `start`.
    ///
    /// # Errors
    /// [`crate::Error::InvalidVertex`] if `start` is unknown.
    pub fn new(graph: &'a AdjacencyGraph<W>, start: VertexId) -> Result<Self> {
        graph.check_vertex(start)?;
        let mut visited = vec![false; graph.vertex_count()];
        visited[start.index()] = true;
        Ok(Self {
            graph,
            visited,
            stack: vec![start],
        })
    }
}

impl<W: Copy> Iterator for Dfs<'_, W> {
    type Item = VertexId;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.stack.pop()?;
        for (v, _) in self.graph.neighbors(u).ok()? {
            if !self.visited[v.index()] {
                self.visited[v.index()] = true;
                self.stack.push(v);
            }
        }
        Some(u)
    }
}

/// Computes single-source shortest-path distances with Dijkstra's algorithm.
///
/// Returns one entry per vertex: `Some(distance)` for vertices reachable from
/// `source` and `None` for the rest. Edge weights must be non-negative; the
/// algorithm composes the graph with a min-[`BinaryHeap`] and relaxes via
/// `decrease_key`, so each vertex carries at most one heap entry.
///
/// # Errors
/// [`crate::Error::InvalidVertex`] if `source` is unknown.
pub fn dijkstra<W>(graph: &AdjacencyGraph<W>, source: VertexId) -> Result<Vec<Option<W>>>
where
    W: Copy + PartialOrd + Zero + Add<Output = W>,
{
    graph.check_vertex(source)?;

    let mut dist: Vec<Option<W>> = vec![None; graph.vertex_count()];
    dist[source.index()] = Some(W::zero());

    let mut frontier: BinaryHeap<VertexId, W> = BinaryHeap::min();
    frontier.insert(source, W::zero())?;

    while !frontier.is_empty() {
        let (u, du) = frontier.extract_top()?;
        for (v, w) in graph.neighbors(u)? {
            let candidate = du + w;
            let improves = match dist[v.index()] {
                None => true,
                Some(dv) => candidate < dv,
            };
            if improves {
                dist[v.index()] = Some(candidate);
                if frontier.contains(&v) {
                    frontier.decrease_key(&v, candidate)?;
                } else {
                    frontier.insert(v, candidate)?;
                }
            }
        }
    }

    Ok(dist)
}

/// Computes a topological order of a directed graph with Kahn's algorithm.
///
/// Returns `None` if the graph contains a cycle. The order is only meaningful
/// for directed graphs; on an undirected graph every edge is a 2-cycle.
pub fn topological_sort<W: Copy>(graph: &AdjacencyGraph<W>) -> Option<Vec<VertexId>> {
    let n = graph.vertex_count();
    let mut in_degree = vec![0usize; n];
    for u in graph.vertices() {
        // vertices() only yields valid ids
        for (v, _) in graph.neighbors(u).ok()? {
            in_degree[v.index()] += 1;
        }
    }

    let mut ready: VecDeque<VertexId> = graph
        .vertices()
        .filter(|v| in_degree[v.index()] == 0)
        .collect();
    let mut order = Vec::with_capacity(n);

    while let Some(u) = ready.pop_front() {
        order.push(u);
        for (v, _) in graph.neighbors(u).ok()? {
            in_degree[v.index()] -= 1;
            if in_degree[v.index()] == 0 {
                ready.push_back(v);
            }
        }
    }

    if order.len() == n {
        Some(order)
    } else {
        None
    }
}
