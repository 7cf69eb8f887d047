//! Undirected graph with an adjacency index for constant-time edge lookup.
//!
//! The parallel lists store each edge in the orientation it was first
//! added. Adding `(b, a)` when `(a, b)` is stored is a silent no-op: no
//! entry, no log record.

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use super::{ChangeLog, EdgeList, Graph, NeighborWeights, Store};
use crate::error::GraphError;

#[derive(Debug, Clone, PartialEq)]
pub struct UndirectedGraph {
    store: Store,
    /// Symmetric adjacency: `a ∈ adjacency[b]` iff an edge joins them.
    adjacency: IndexMap<String, IndexSet<String>>,
}

impl Default for UndirectedGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl UndirectedGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Store::new(true),
            adjacency: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn without_history() -> Self {
        Self {
            store: Store::new(false),
            adjacency: IndexMap::new(),
        }
    }

    /// Pre-seed from parallel edge sequences.
    ///
    /// Entries duplicating an earlier pair in either orientation are
    /// dropped. Seeding is not logged.
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
        let seeded = EdgeList::from_parallel(source, target, weight)?;
        let mut graph = Self {
            store: Store::new(history),
            adjacency: IndexMap::new(),
        };
        graph.init_vertices(seeded.sources().iter().chain(seeded.targets()).cloned());
        for (begin, end, weight) in seeded.iter() {
            graph.seed_edge(begin, end, weight);
        }
        Ok(graph)
    }

    /// Seed the vertex set without validation or logging.
    ///
    /// Names already present are skipped; order of first appearance is kept.
    pub fn init_vertices(&mut self, vertices: impl IntoIterator<Item = String>) {
        for name in vertices {
            self.store.vertices.insert(name);
        }
    }

    /// Add an isolated vertex.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::DuplicateVertex`] if `name` is already present.
    pub fn add_vertex(&mut self, name: &str) -> Result<(), GraphError> {
        self.add_vertex_with_edges(name, &NeighborWeights::new(), &NeighborWeights::new())
    }

    /// Add a vertex with edges to the listed neighbors.
    ///
    /// `incoming` entries are stored as `(neighbor, name)` and `outcoming`
    /// entries as `(name, neighbor)`. A neighbor listed in both maps yields
    /// a single edge, the first one encountered.
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
            self.insert_edge(source, name, weight);
        }
        for (target, &weight) in outcoming {
            self.insert_edge(name, target, weight);
        }
        Ok(())
    }

    /// Add an edge unless one already joins the pair in either orientation.
    ///
    /// Returns `true` when a new edge was stored.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownVertex`] if either endpoint is absent.
    pub fn add_edge(&mut self, begin: &str, end: &str, weight: f64) -> Result<bool, GraphError> {
        self.store.require_vertex(begin)?;
        self.store.require_vertex(end)?;
        Ok(self.insert_edge(begin, end, weight))
    }

    /// Remove the edge joining `begin` and `end`, in whichever orientation
    /// it is stored. Returns the number of entries removed.
    pub fn remove_edge(&mut self, begin: &str, end: &str) -> usize {
        if !self.contains_edge(begin, end) {
            return 0;
        }
        let removed = self
            .store
            .edges
            .remove_where(|s, t| (s == begin && t == end) || (s == end && t == begin));
        for (source, target, _) in &removed {
            self.store.history.edge_removed(source, target);
        }
        self.unlink(begin, end);
        trace!(begin, end, "removed undirected edge");
        removed.len()
    }

    /// Remove a vertex and every edge touching it.
    ///
    /// Returns `false` when the vertex was absent. Only the vertex removal
    /// is logged.
    pub fn remove_vertex(&mut self, name: &str) -> bool {
        if self.store.remove_vertex(name).is_none() {
            return false;
        }
        if let Some(neighbors) = self.adjacency.shift_remove(name) {
            for neighbor in &neighbors {
                if let Some(set) = self.adjacency.get_mut(neighbor) {
                    set.shift_remove(name);
                }
            }
        }
        true
    }

    /// Whether an edge joins `a` and `b` in either orientation.
    #[must_use]
    pub fn contains_edge(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|set| set.contains(b))
    }

    /// Distinct neighbors of `vertex` in the order their edges were added.
    #[must_use]
    pub fn neighbors(&self, vertex: &str) -> Vec<&str> {
        self.adjacency
            .get(vertex)
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn degree(&self, vertex: &str) -> usize {
        self.adjacency.get(vertex).map_or(0, IndexSet::len)
    }

    /// Store and log an edge between vertices known to exist.
    pub(crate) fn insert_edge(&mut self, begin: &str, end: &str, weight: f64) -> bool {
        if self.contains_edge(begin, end) {
            return false;
        }
        self.store.push_edge(begin, end, weight);
        self.link(begin, end);
        true
    }

    /// Like [`Self::insert_edge`] but without a log record.
    pub(crate) fn seed_edge(&mut self, begin: &str, end: &str, weight: f64) -> bool {
        if self.contains_edge(begin, end) {
            return false;
        }
        self.store.edges.push(begin, end, weight);
        self.link(begin, end);
        true
    }

    fn link(&mut self, a: &str, b: &str) {
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string());
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .insert(a.to_string());
    }

    fn unlink(&mut self, a: &str, b: &str) {
        if let Some(set) = self.adjacency.get_mut(a) {
            set.shift_remove(b);
        }
        if let Some(set) = self.adjacency.get_mut(b) {
            set.shift_remove(a);
        }
    }
}

impl Graph for UndirectedGraph {
    fn vertices(&self) -> &IndexSet<String> {
        &self.store.vertices
    }

    fn edge_list(&self) -> &EdgeList {
        &self.store.edges
    }

    fn history(&self) -> &ChangeLog {
        &self.store.history
    }

    fn directed(&self) -> bool {
        false
    }
}
