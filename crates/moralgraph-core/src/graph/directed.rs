//! Directed graph with parallel-list edge storage.
//!
//! Edges are ordered `(begin, end)` pairs. Nothing prevents parallel
//! duplicates or self-loops beyond the endpoint-existence check, and
//! [`DirectedGraph::remove_edge`] removes every duplicate of a pair at once.

use tracing::trace;

use super::{ChangeLog, EdgeList, Graph, NeighborWeights, Store};
use crate::error::GraphError;
use crate::moralize::{Moralized, moralize};

#[derive(Debug, Clone, PartialEq)]
pub struct DirectedGraph {
    store: Store,
}

impl Default for DirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectedGraph {
    /// Empty graph that records a change log.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Store::new(true),
        }
    }

    /// Empty graph whose change log stays empty.
    #[must_use]
    pub fn without_history() -> Self {
        Self {
            store: Store::new(false),
        }
    }

    /// Pre-seed from parallel edge sequences.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MalformedInput`] when the sequences differ in
    /// length.
    pub fn from_edges(
        source: Vec<String>,
        target: Vec<String>,
        weight: Vec<f64>,
        history: bool,
    ) -> Result<Self, GraphError> {
        Ok(Self {
            store: Store::from_edges(source, target, weight, history)?,
        })
    }

    /// Add an isolated vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `name` is already present.
    pub fn add_vertex(&mut self, name: &str) -> Result<(), GraphError> {
        self.add_vertex_with_edges(name, &NeighborWeights::new(), &NeighborWeights::new())
    }

    /// Add a vertex together with edges into it (`incoming`, keyed by
    /// source) and out of it (`outcoming`, keyed by target).
    ///
    /// The vertex record is logged first, then one record per edge: all
    /// incoming edges, then all outgoing edges, each in map order.
    ///
    /// # Errors
    ///
    /// - [`GraphError::DuplicateVertex`] if `name` is already present.
    /// - [`GraphError::UnknownVertex`] if any neighbor is absent.
    ///
    /// On error the graph is unchanged.
    pub fn add_vertex_with_edges(
        &mut self,
        name: &str,
        incoming: &NeighborWeights,
        outcoming: &NeighborWeights,
    ) -> Result<(), GraphError> {
        self.store.validate_new_vertex(name, [incoming, outcoming])?;

        self.store.insert_vertex(name);
        for (source, &weight) in incoming {
            self.store.push_edge(source, name, weight);
        }
        for (target, &weight) in outcoming {
            self.store.push_edge(name, target, weight);
        }
        Ok(())
    }

    /// Append a `begin → end` edge. Duplicates are kept.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if either endpoint is absent.
    pub fn add_edge(&mut self, begin: &str, end: &str, weight: f64) -> Result<(), GraphError> {
        self.store.require_vertex(begin)?;
        self.store.require_vertex(end)?;
        self.store.push_edge(begin, end, weight);
        Ok(())
    }

    /// Seed the vertex set without validation or logging.
    pub(crate) fn init_vertices(&mut self, vertices: impl IntoIterator<Item = String>) {
        for name in vertices {
            self.store.vertices.insert(name);
        }
    }

    /// Store and log an edge between vertices known to exist.
    pub(crate) fn insert_edge(&mut self, begin: &str, end: &str, weight: f64) {
        debug_assert!(self.contains_vertex(begin) && self.contains_vertex(end));
        self.store.push_edge(begin, end, weight);
    }

    /// Remove every `begin → end` entry, logging one record per entry.
    ///
    /// Returns the number of entries removed; unknown endpoints remove
    /// nothing.
    pub fn remove_edge(&mut self, begin: &str, end: &str) -> usize {
        if !self.contains_vertex(begin) || !self.contains_vertex(end) {
            return 0;
        }
        let removed = self.store.edges.remove_where(|s, t| s == begin && t == end);
        for _ in &removed {
            self.store.history.edge_removed(begin, end);
        }
        trace!(begin, end, count = removed.len(), "removed directed edges");
        removed.len()
    }

    /// Remove a vertex and every edge touching it.
    ///
    /// Returns `false` when the vertex was absent. Only the vertex removal
    /// is logged.
    pub fn remove_vertex(&mut self, name: &str) -> bool {
        self.store.remove_vertex(name).is_some()
    }

    /// Direct predecessors of `vertex`, one per incoming edge, in edge order.
    #[must_use]
    pub fn predecessors(&self, vertex: &str) -> Vec<&str> {
        self.store
            .edges
            .iter()
            .filter(|(_, target, _)| *target == vertex)
            .map(|(source, _, _)| source)
            .collect()
    }

    /// Direct successors of `vertex`, one per outgoing edge, in edge order.
    #[must_use]
    pub fn successors(&self, vertex: &str) -> Vec<&str> {
        self.store
            .edges
            .iter()
            .filter(|(source, _, _)| *source == vertex)
            .map(|(_, target, _)| target)
            .collect()
    }

    /// Build the skeleton and moral graph. See [`crate::moralize`].
    #[must_use]
    pub fn moralize(&self) -> Moralized {
        moralize(self)
    }
}

impl Graph for DirectedGraph {
    fn vertices(&self) -> &indexmap::IndexSet<String> {
        &self.store.vertices
    }

    fn edge_list(&self) -> &EdgeList {
        &self.store.edges
    }

    fn history(&self) -> &ChangeLog {
        &self.store.history
    }

    fn directed(&self) -> bool {
        true
    }
}
