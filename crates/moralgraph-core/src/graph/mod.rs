//! Graph data structures.
//!
//! # Overview
//!
//! Two variants share one capability contract, the [`Graph`] trait:
//!
//! - [`DirectedGraph`] — ordered edges, parallel duplicates allowed.
//! - [`UndirectedGraph`] — unordered edges, at most one stored orientation
//!   per vertex pair.
//!
//! Both keep vertices in an insertion-ordered, duplicate-free set and edges
//! in three parallel sequences ([`EdgeList`]). Every structural mutation is
//! appended to a [`ChangeLog`] unless the graph was built without history.
//!
//! ## Validation
//!
//! Insertions validate first and mutate second: a failed `add_vertex` or
//! `add_edge` leaves the graph exactly as it was. Removals of absent
//! vertices or edges are silent no-ops.
//!
//! ```text
//! loader ─→ DirectedGraph ─→ moralize() ─→ (skeleton, moral): UndirectedGraph
//!                                                  ↓
//!                                         triangulate() ─→ chordal UndirectedGraph
//! ```

pub mod directed;
pub mod edges;
pub mod history;
pub mod undirected;

use indexmap::{IndexMap, IndexSet};

use crate::error::GraphError;

pub use directed::DirectedGraph;
pub use edges::EdgeList;
pub use history::{Change, ChangeKind, ChangeLog, Marker};
pub use undirected::UndirectedGraph;

/// Insertion-ordered mapping from neighbor name to edge weight.
pub type NeighborWeights = IndexMap<String, f64>;

/// Read-only capabilities shared by directed and undirected graphs.
pub trait Graph {
    /// Vertex names in insertion order.
    fn vertices(&self) -> &IndexSet<String>;

    /// The parallel edge sequences.
    fn edge_list(&self) -> &EdgeList;

    /// The change log (empty when history is disabled).
    fn history(&self) -> &ChangeLog;

    /// Fixed tag distinguishing the variant.
    fn directed(&self) -> bool;

    fn source_list(&self) -> &[String] {
        self.edge_list().sources()
    }

    fn target_list(&self) -> &[String] {
        self.edge_list().targets()
    }

    fn weight_list(&self) -> &[f64] {
        self.edge_list().weights()
    }

    /// `(source, target, weight)` triples in insertion order.
    fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.edge_list().iter()
    }

    fn contains_vertex(&self, name: &str) -> bool {
        self.vertices().contains(name)
    }

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    fn edge_count(&self) -> usize {
        self.edge_list().len()
    }
}

/// State common to both variants.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Store {
    pub(crate) vertices: IndexSet<String>,
    pub(crate) edges: EdgeList,
    pub(crate) history: ChangeLog,
}

impl Store {
    pub(crate) fn new(history: bool) -> Self {
        Self {
            vertices: IndexSet::new(),
            edges: EdgeList::new(),
            history: if history {
                ChangeLog::new()
            } else {
                ChangeLog::disabled()
            },
        }
    }

    /// Seed from parallel sequences; the vertex set is every distinct
    /// endpoint in first-seen order. Seeding is not logged.
    pub(crate) fn from_edges(
        source: Vec<String>,
        target: Vec<String>,
        weight: Vec<f64>,
        history: bool,
    ) -> Result<Self, GraphError> {
        let edges = EdgeList::from_parallel(source, target, weight)?;
        let vertices = edges
            .sources()
            .iter()
            .chain(edges.targets())
            .cloned()
            .collect();
        let mut store = Self::new(history);
        store.vertices = vertices;
        store.edges = edges;
        Ok(store)
    }

    pub(crate) fn require_vertex(&self, name: &str) -> Result<(), GraphError> {
        if self.vertices.contains(name) {
            Ok(())
        } else {
            Err(GraphError::UnknownVertex(name.to_string()))
        }
    }

    /// Check a vertex insertion and its neighbor maps without mutating.
    ///
    /// The new vertex itself does not count as existing, so a map that
    /// references `name` is rejected.
    pub(crate) fn validate_new_vertex<'a>(
        &self,
        name: &str,
        neighbor_maps: impl IntoIterator<Item = &'a NeighborWeights>,
    ) -> Result<(), GraphError> {
        if self.vertices.contains(name) {
            return Err(GraphError::DuplicateVertex(name.to_string()));
        }
        for map in neighbor_maps {
            for neighbor in map.keys() {
                self.require_vertex(neighbor)?;
            }
        }
        Ok(())
    }

    pub(crate) fn insert_vertex(&mut self, name: &str) {
        self.vertices.insert(name.to_string());
        self.history.vertex_added(name);
    }

    pub(crate) fn push_edge(&mut self, source: &str, target: &str, weight: f64) {
        self.edges.push(source, target, weight);
        self.history.edge_added(source, target, weight);
    }

    /// Drop a vertex and every incident edge.
    ///
    /// Only the vertex removal is logged; incident edges disappear silently.
    /// Returns the removed incident edges, or `None` when the vertex was
    /// absent.
    pub(crate) fn remove_vertex(&mut self, name: &str) -> Option<Vec<(String, String, f64)>> {
        if !self.vertices.shift_remove(name) {
            return None;
        }
        self.history.vertex_removed(name);
        Some(self.edges.remove_where(|s, t| s == name || t == name))
    }
}
