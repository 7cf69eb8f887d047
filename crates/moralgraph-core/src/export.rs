//! Read-only snapshots for external renderers.
//!
//! A [`GraphSnapshot`] carries everything a visualizer needs to draw a graph
//! or replay how it was built: the directed flag, vertices in order, the
//! three parallel edge sequences and the change log.

use serde::Serialize;

use crate::graph::{Change, Graph};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub directed: bool,
    pub vertices: Vec<String>,
    pub source: Vec<String>,
    pub target: Vec<String>,
    pub weight: Vec<f64>,
    pub history: Vec<Change>,
}

impl GraphSnapshot {
    #[must_use]
    pub fn from_graph(graph: &impl Graph) -> Self {
        Self {
            directed: graph.directed(),
            vertices: graph.vertices().iter().cloned().collect(),
            source: graph.source_list().to_vec(),
            target: graph.target_list().to_vec(),
            weight: graph.weight_list().to_vec(),
            history: graph.history().records().to_vec(),
        }
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Propagates any `serde_json` serializer error.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ChangeKind, DirectedGraph, UndirectedGraph};

    #[test]
    fn snapshot_mirrors_graph() {
        let mut graph = DirectedGraph::new();
        graph.add_vertex("A").expect("vertex");
        graph.add_vertex("B").expect("vertex");
        graph.add_edge("A", "B", 1.5).expect("edge");

        let snapshot = GraphSnapshot::from_graph(&graph);

        assert!(snapshot.directed);
        assert_eq!(snapshot.vertices, ["A", "B"]);
        assert_eq!(snapshot.source, ["A"]);
        assert_eq!(snapshot.target, ["B"]);
        assert_eq!(snapshot.weight, [1.5]);
        assert_eq!(snapshot.history.len(), 3);
        assert_eq!(snapshot.history[2].kind, ChangeKind::EdgeAdded);
    }

    #[test]
    fn json_uses_snake_case_kinds() {
        let mut graph = UndirectedGraph::new();
        graph.add_vertex("A").expect("vertex");

        let json = GraphSnapshot::from_graph(&graph).to_json().expect("finite weights");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["directed"], false);
        assert_eq!(value["history"][0]["kind"], "vertex_added");
        assert_eq!(value["vertices"][0], "A");
    }
}
