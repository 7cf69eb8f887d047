//! Summary statistics for graphs at each pipeline stage.
//!
//! # Statistics Provided
//!
//! - **vertex_count** / **edge_count**: sizes as stored (directed parallel
//!   duplicates count separately).
//! - **density**: `edge_count / max_edges`, where `max_edges` is
//!   `n * (n - 1)` for directed and `n * (n - 1) / 2` for undirected
//!   graphs. Zero for graphs with 0 or 1 vertex.
//! - **component_count**: connected components, ignoring direction.
//! - **isolated_vertex_count**: vertices with no incident edge.
//! - **max_degree**: highest number of incident edge entries on a vertex.
//! - **chordal**: only meaningful for undirected graphs; `None` for
//!   directed input.

use std::collections::HashMap;

use petgraph::algo::{connected_components, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex, UnGraph};
use serde::Serialize;

use crate::chordal::is_chordal;
use crate::graph::{DirectedGraph, Graph, UndirectedGraph};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub directed: bool,
    pub vertex_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub isolated_vertex_count: usize,
    pub max_degree: usize,
    pub chordal: Option<bool>,
}

impl GraphStats {
    #[must_use]
    pub fn from_directed(graph: &DirectedGraph) -> Self {
        let mut stats = Self::common(graph);
        stats.component_count = connected_components(&to_petgraph_directed(graph));
        stats
    }

    #[must_use]
    pub fn from_undirected(graph: &UndirectedGraph) -> Self {
        let mut stats = Self::common(graph);
        stats.component_count = connected_components(&to_petgraph_undirected(graph));
        stats.chordal = Some(is_chordal(graph));
        stats
    }

    fn common(graph: &impl Graph) -> Self {
        let vertex_count = graph.vertex_count();
        let edge_count = graph.edge_count();

        let mut degree: HashMap<&str, usize> = HashMap::new();
        for (source, target, _) in graph.edge_list().iter() {
            *degree.entry(source).or_default() += 1;
            if source != target {
                *degree.entry(target).or_default() += 1;
            }
        }
        let isolated_vertex_count = graph
            .vertices()
            .iter()
            .filter(|v| !degree.contains_key(v.as_str()))
            .count();

        Self {
            directed: graph.directed(),
            vertex_count,
            edge_count,
            density: compute_density(vertex_count, edge_count, graph.directed()),
            component_count: 0,
            isolated_vertex_count,
            max_degree: degree.values().copied().max().unwrap_or(0),
            chordal: None,
        }
    }
}

/// Whether the directed graph has no directed cycle (self-loops count).
#[must_use]
pub fn is_acyclic(graph: &DirectedGraph) -> bool {
    !is_cyclic_directed(&to_petgraph_directed(graph))
}

/// Convert to a petgraph `DiGraph`; node weights borrow vertex names.
#[must_use]
pub fn to_petgraph_directed(graph: &DirectedGraph) -> DiGraph<&str, f64> {
    let mut out = DiGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    let index = add_nodes(graph, |name| out.add_node(name));
    for (source, target, weight) in graph.edge_list().iter() {
        if let (Some(&a), Some(&b)) = (index.get(source), index.get(target)) {
            out.add_edge(a, b, weight);
        }
    }
    out
}

/// Convert to a petgraph `UnGraph`; node weights borrow vertex names.
#[must_use]
pub fn to_petgraph_undirected(graph: &UndirectedGraph) -> UnGraph<&str, f64> {
    let mut out = UnGraph::with_capacity(graph.vertex_count(), graph.edge_count());
    let index = add_nodes(graph, |name| out.add_node(name));
    for (source, target, weight) in graph.edge_list().iter() {
        if let (Some(&a), Some(&b)) = (index.get(source), index.get(target)) {
            out.add_edge(a, b, weight);
        }
    }
    out
}

fn add_nodes<'g>(
    graph: &'g impl Graph,
    mut add: impl FnMut(&'g str) -> NodeIndex,
) -> HashMap<&'g str, NodeIndex> {
    graph
        .vertices()
        .iter()
        .map(|name| (name.as_str(), add(name.as_str())))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertex_count: usize, edge_count: usize, directed: bool) -> f64 {
    if vertex_count < 2 {
        return 0.0;
    }
    let pairs = vertex_count * (vertex_count - 1);
    let max_edges = if directed { pairs } else { pairs / 2 };
    edge_count as f64 / max_edges as f64
}
