//! Greedy fill-in until no chordless cycle longer than three remains.
//!
//! # Overview
//!
//! Each pass asks [`find_cycles`] for the current chordless cycles and walks
//! them in order. For every vertex `v` of a cycle, its *local neighbors* are
//! the distinct vertices of the same cycle joined to `v` by an edge. When
//! `v` has exactly two local neighbors that are not yet adjacent, a fill
//! edge (weight 0) joins them, cutting `v` off as an ear of the cycle.
//! Vertices with more than two local neighbors are skipped. Edges added
//! earlier in a pass count when later vertices and cycles are examined.
//!
//! The loop repeats until a pass finds no cycle. Every surviving cycle is
//! chordless, so its first vertex always has two non-adjacent local
//! neighbors and each pass adds at least one edge; the loop therefore ends
//! after at most `n * (n - 1) / 2` passes. The result is a chordal graph but
//! not a minimum fill-in: the edges chosen depend on vertex and edge order.

use std::collections::HashSet;

use tracing::{debug, info, instrument, trace};

use crate::cycles::find_cycles;
use crate::graph::{Graph, UndirectedGraph};

/// Knobs for [`triangulate_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriangulateOptions {
    /// Stop after this many passes even if cycles remain. `None` runs to
    /// convergence.
    pub max_passes: Option<usize>,
}

impl TriangulateOptions {
    #[must_use]
    pub const fn unbounded() -> Self {
        Self { max_passes: None }
    }

    #[must_use]
    pub const fn with_max_passes(max_passes: usize) -> Self {
        Self {
            max_passes: Some(max_passes),
        }
    }
}

/// Outcome of [`triangulate_with`].
#[derive(Debug, Clone, PartialEq)]
pub struct Triangulation {
    /// The input graph with fill edges added.
    pub graph: UndirectedGraph,
    /// Fill edges in the order they were inserted.
    pub fill_edges: Vec<(String, String)>,
    /// Passes that found at least one cycle.
    pub passes: usize,
    /// `false` only when `max_passes` stopped the loop with cycles left.
    pub converged: bool,
}

impl Triangulation {
    #[must_use]
    pub fn fill_count(&self) -> usize {
        self.fill_edges.len()
    }

    #[must_use]
    pub fn into_graph(self) -> UndirectedGraph {
        self.graph
    }
}

/// Add fill edges to `graph` until it is chordal and return it.
///
/// Fill edges are logged in the graph's change log like any other edge.
#[must_use]
pub fn triangulate(graph: UndirectedGraph) -> UndirectedGraph {
    triangulate_with(graph, TriangulateOptions::unbounded()).into_graph()
}

/// [`triangulate`] with options and a detailed result.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn triangulate_with(mut graph: UndirectedGraph, options: TriangulateOptions) -> Triangulation {
    let mut fill_edges = Vec::new();
    let mut passes = 0usize;

    let converged = loop {
        let cycles = find_cycles(&graph);
        if cycles.is_empty() {
            break true;
        }
        if options.max_passes.is_some_and(|max| passes >= max) {
            info!(
                passes,
                remaining_cycles = cycles.len(),
                "pass limit reached before the graph became chordal"
            );
            break false;
        }

        passes += 1;
        let before = fill_edges.len();
        for cycle in &cycles {
            fill_cycle(&mut graph, cycle, &mut fill_edges);
        }
        debug!(
            pass = passes,
            cycles = cycles.len(),
            added = fill_edges.len() - before,
            "fill-in pass complete"
        );
    };

    debug!(passes, fill = fill_edges.len(), converged, "triangulation finished");

    Triangulation {
        graph,
        fill_edges,
        passes,
        converged,
    }
}

/// One cycle's worth of fill-in.
fn fill_cycle(graph: &mut UndirectedGraph, cycle: &[String], fill: &mut Vec<(String, String)>) {
    let members: HashSet<&str> = cycle.iter().map(String::as_str).collect();

    for vertex in cycle {
        let local: Vec<String> = graph
            .neighbors(vertex)
            .into_iter()
            .filter(|n| *n != vertex.as_str() && members.contains(n))
            .map(str::to_string)
            .collect();

        let [a, b] = local.as_slice() else {
            trace!(vertex = %vertex, local = local.len(), "skipping vertex");
            continue;
        };
        if graph.contains_edge(a, b) {
            continue;
        }
        graph.insert_edge(a, b, 0.0);
        trace!(vertex = %vertex, a = %a, b = %b, "added fill edge");
        fill.push((a.clone(), b.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chordal::is_chordal;

    fn ring(names: &[&str]) -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for name in names {
            graph.add_vertex(name).expect("vertex");
        }
        for (i, a) in names.iter().enumerate() {
            let b = names[(i + 1) % names.len()];
            graph.add_edge(a, b, 1.0).expect("edge");
        }
        graph
    }

    #[test]
    fn square_gets_one_chord() {
        let result = triangulate_with(ring(&["A", "B", "C", "D"]), TriangulateOptions::default());

        assert_eq!(result.fill_edges, vec![("B".to_string(), "D".to_string())]);
        assert_eq!(result.passes, 1);
        assert!(result.converged);
        assert!(is_chordal(&result.graph));
    }

    #[test]
    fn pentagon_gets_two_fill_edges() {
        let graph = ring(&["A", "B", "C", "D", "E"]);
        let original_edges = graph.edge_count();

        let result = triangulate_with(graph, TriangulateOptions::default());

        assert_eq!(result.fill_count(), 2);
        assert_eq!(result.graph.edge_count(), original_edges + 2);
        assert!(find_cycles(&result.graph).is_empty());
        assert!(is_chordal(&result.graph));
    }

    #[test]
    fn fill_edges_carry_zero_weight_and_are_logged() {
        let graph = ring(&["A", "B", "C", "D"]);
        let log_len = graph.history().len();

        let graph = triangulate(graph);

        assert_eq!(graph.weight_list().last().copied(), Some(0.0));
        assert_eq!(graph.history().len(), log_len + 1);
    }

    #[test]
    fn chordal_input_is_unchanged() {
        let mut graph = ring(&["A", "B", "C", "D"]);
        graph.add_edge("A", "C", 0.0).expect("chord");
        let before = graph.clone();

        let result = triangulate_with(graph, TriangulateOptions::default());

        assert_eq!(result.graph, before);
        assert!(result.fill_edges.is_empty());
        assert_eq!(result.passes, 0);
        assert!(result.converged);
    }

    #[test]
    fn empty_graph_converges_immediately() {
        let result = triangulate_with(UndirectedGraph::new(), TriangulateOptions::default());
        assert!(result.converged);
        assert_eq!(result.passes, 0);
    }

    #[test]
    fn pass_limit_stops_early_without_error() {
        let result = triangulate_with(
            ring(&["A", "B", "C", "D", "E", "F", "G", "H"]),
            TriangulateOptions::with_max_passes(0),
        );

        assert!(!result.converged);
        assert_eq!(result.passes, 0);
        assert!(result.fill_edges.is_empty());
    }

    #[test]
    fn long_ring_triangulates_to_chordal() {
        let names = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];
        let result = triangulate_with(ring(&names), TriangulateOptions::default());

        assert!(result.converged);
        assert!(is_chordal(&result.graph));
        // A triangulated n-cycle has exactly n - 3 chords when no chord is
        // redundant; greedy fill may add more but never fewer.
        assert!(result.fill_count() >= names.len() - 3);
    }
}
