//! Moralization of a directed dependency graph.
//!
//! # Overview
//!
//! [`moralize`] produces two undirected graphs from a [`DirectedGraph`]:
//!
//! 1. **Skeleton** — the same vertex set with every edge's direction
//!    dropped (weight 0).
//! 2. **Moral graph** — the skeleton plus edges linking the parents of each
//!    vertex.
//!
//! ## Parent ring
//!
//! Parents `p1..pk` of a vertex (k > 1, edge-list order) are linked as a
//! ring `p1–p2, …, p(k-1)–pk, pk–p1`, not as a full clique. For three or
//! fewer parents the two coincide; with four or more parents the ring
//! leaves some parent pairs unconnected. Downstream clique construction
//! that needs the textbook definition must add the missing pairs itself.
//!
//! ## Change logs
//!
//! The skeleton logs each edge it gains. The moral graph is seeded with the
//! skeleton's edges silently, so its log holds only the parent-linking
//! edges; replaying it on top of the skeleton shows what moralization added.
//! Both logs stay empty when the input graph has history disabled.

use tracing::{debug, instrument, warn};

use crate::graph::{DirectedGraph, Graph, UndirectedGraph};
use crate::stats;

/// Output of [`moralize`].
#[derive(Debug, Clone, PartialEq)]
pub struct Moralized {
    /// Directed edges with direction dropped.
    pub skeleton: UndirectedGraph,
    /// Skeleton plus parent-linking edges.
    pub moral: UndirectedGraph,
}

impl Moralized {
    #[must_use]
    pub fn into_parts(self) -> (UndirectedGraph, UndirectedGraph) {
        (self.skeleton, self.moral)
    }
}

/// Build the skeleton and moral graph of `graph`.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn moralize(graph: &DirectedGraph) -> Moralized {
    if !stats::is_acyclic(graph) {
        warn!("moralizing a directed graph that contains a cycle");
    }

    let skeleton = skeleton(graph);

    let mut moral = derived_graph(graph);
    moral.init_vertices(graph.vertices().iter().cloned());
    for (source, target, weight) in skeleton.edge_list().iter() {
        moral.seed_edge(source, target, weight);
    }

    for vertex in graph.vertices() {
        let parents = graph.predecessors(vertex);
        if parents.len() <= 1 {
            continue;
        }
        for pair in parents.windows(2) {
            moral.insert_edge(pair[0], pair[1], 0.0);
        }
        if let (Some(last), Some(first)) = (parents.last(), parents.first()) {
            moral.insert_edge(last, first, 0.0);
        }
    }

    debug!(
        skeleton_edges = skeleton.edge_count(),
        moral_edges = moral.edge_count(),
        "moralization complete"
    );

    Moralized { skeleton, moral }
}

/// Direction-dropped copy of `graph`, seeded with its full vertex set.
#[must_use]
pub fn skeleton(graph: &DirectedGraph) -> UndirectedGraph {
    let mut skeleton = derived_graph(graph);
    skeleton.init_vertices(graph.vertices().iter().cloned());
    for vertex in graph.vertices() {
        for child in graph.successors(vertex) {
            skeleton.insert_edge(vertex, child, 0.0);
        }
    }
    skeleton
}

/// Empty undirected graph that records history only when `source` does.
fn derived_graph(source: &DirectedGraph) -> UndirectedGraph {
    if source.history().is_enabled() {
        UndirectedGraph::new()
    } else {
        UndirectedGraph::without_history()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ChangeKind;

    fn dag(vertices: &[&str], edges: &[(&str, &str)]) -> DirectedGraph {
        let mut graph = DirectedGraph::new();
        for v in vertices {
            graph.add_vertex(v).expect("fresh vertex");
        }
        for (a, b) in edges {
            graph.add_edge(a, b, 1.0).expect("known endpoints");
        }
        graph
    }

    fn pairs(graph: &UndirectedGraph) -> Vec<(String, String)> {
        graph
            .edge_list()
            .iter()
            .map(|(a, b, _)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn skeleton_drops_direction_and_weight() {
        let graph = dag(&["A", "B", "C"], &[("A", "B"), ("C", "B")]);

        let skeleton = skeleton(&graph);

        assert_eq!(
            pairs(&skeleton),
            vec![("A".into(), "B".into()), ("C".into(), "B".into())]
        );
        assert!(skeleton.weight_list().iter().all(|w| *w == 0.0));
        assert_eq!(skeleton.vertex_count(), 3);
    }

    #[test]
    fn skeleton_keeps_isolated_vertices() {
        let graph = dag(&["A", "B", "Lonely"], &[("A", "B")]);
        let Moralized { skeleton, moral } = moralize(&graph);

        assert!(skeleton.contains_vertex("Lonely"));
        assert!(moral.contains_vertex("Lonely"));
    }

    #[test]
    fn three_parents_form_a_closed_ring() {
        let graph = dag(
            &["P1", "P2", "P3", "C"],
            &[("P1", "C"), ("P2", "C"), ("P3", "C")],
        );

        let moral = moralize(&graph).moral;

        assert!(moral.contains_edge("P1", "P2"));
        assert!(moral.contains_edge("P2", "P3"));
        assert!(moral.contains_edge("P3", "P1"));
        assert_eq!(moral.edge_count(), 6);
    }

    #[test]
    fn four_parents_form_a_ring_not_a_clique() {
        let graph = dag(
            &["P1", "P2", "P3", "P4", "C"],
            &[("P1", "C"), ("P2", "C"), ("P3", "C"), ("P4", "C")],
        );

        let moral = moralize(&graph).moral;

        assert!(moral.contains_edge("P1", "P2"));
        assert!(moral.contains_edge("P2", "P3"));
        assert!(moral.contains_edge("P3", "P4"));
        assert!(moral.contains_edge("P4", "P1"));
        assert!(!moral.contains_edge("P1", "P3"));
        assert!(!moral.contains_edge("P2", "P4"));
    }

    #[test]
    fn single_parent_adds_nothing() {
        let graph = dag(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);

        let Moralized { skeleton, moral } = moralize(&graph);

        assert_eq!(pairs(&skeleton), pairs(&moral));
        assert!(moral.history().is_empty());
    }

    #[test]
    fn moral_log_holds_only_parent_links() {
        let graph = dag(&["A", "B", "C", "D"], &[("A", "C"), ("B", "C"), ("C", "D")]);

        let Moralized { skeleton, moral } = moralize(&graph);

        assert_eq!(skeleton.history().len(), 3);
        let records: Vec<(ChangeKind, &str, &str)> = moral
            .history()
            .iter()
            .map(|c| (c.kind, c.source.as_str(), c.target.as_str()))
            .collect();
        assert_eq!(records, vec![(ChangeKind::EdgeAdded, "A", "B")]);
    }

    #[test]
    fn history_setting_carries_over_from_input() {
        let mut graph = DirectedGraph::without_history();
        for v in ["A", "B", "C", "D"] {
            graph.add_vertex(v).expect("fresh vertex");
        }
        for (a, b) in [("A", "C"), ("B", "C"), ("C", "D")] {
            graph.add_edge(a, b, 1.0).expect("known endpoints");
        }

        let Moralized { skeleton, moral } = moralize(&graph);

        assert_eq!(skeleton.edge_count(), 3);
        assert_eq!(moral.edge_count(), 4);
        assert!(!skeleton.history().is_enabled());
        assert!(skeleton.history().is_empty());
        assert!(moral.history().is_empty());

        let mut moral = moral;
        assert!(moral.add_edge("A", "D", 0.0).expect("known endpoints"));
        assert!(moral.history().is_empty());
    }

    #[test]
    fn moral_graph_preserves_vertex_order() {
        let graph = dag(&["Z", "A", "M"], &[("Z", "M"), ("A", "M")]);

        let moral = moralize(&graph).moral;

        let order: Vec<&str> = moral.vertices().iter().map(String::as_str).collect();
        assert_eq!(order, ["Z", "A", "M"]);
    }
}
