use proptest::prelude::*;

use moralgraph_core::bench::random_dag;
use moralgraph_core::{
    DirectedGraph, Graph, TriangulateOptions, UndirectedGraph, find_cycles, is_chordal, moralize,
    triangulate_with,
};

/// Cycle enumeration is exponential, so graphs stay small.
const MAX_VERTICES: usize = 7;

fn names(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("V{i}")).collect()
}

fn arb_edges() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1..=MAX_VERTICES).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..20)))
}

#[derive(Debug, Clone)]
enum Op {
    AddEdge(usize, usize),
    RemoveEdge(usize, usize),
    RemoveVertex(usize),
    AddVertex(usize),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    let n = MAX_VERTICES;
    prop::collection::vec(
        prop_oneof![
            4 => (0..n, 0..n).prop_map(|(a, b)| Op::AddEdge(a, b)),
            2 => (0..n, 0..n).prop_map(|(a, b)| Op::RemoveEdge(a, b)),
            1 => (0..n).prop_map(Op::RemoveVertex),
            1 => (0..n).prop_map(Op::AddVertex),
        ],
        0..40,
    )
}

fn build_undirected(n: usize, edges: &[(usize, usize)]) -> UndirectedGraph {
    let names = names(n);
    let mut graph = UndirectedGraph::new();
    for name in &names {
        graph.add_vertex(name).expect("fresh vertex");
    }
    for &(a, b) in edges {
        graph.add_edge(&names[a], &names[b], 0.0).expect("known endpoints");
    }
    graph
}

fn lists_aligned(graph: &impl Graph) -> bool {
    graph.source_list().len() == graph.target_list().len()
        && graph.target_list().len() == graph.weight_list().len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn directed_lists_stay_aligned(ops in arb_ops()) {
        let names = names(MAX_VERTICES);
        let mut graph = DirectedGraph::new();
        for op in ops {
            match op {
                Op::AddEdge(a, b) => { let _ = graph.add_edge(&names[a], &names[b], 1.0); }
                Op::RemoveEdge(a, b) => { graph.remove_edge(&names[a], &names[b]); }
                Op::RemoveVertex(v) => { graph.remove_vertex(&names[v]); }
                Op::AddVertex(v) => { let _ = graph.add_vertex(&names[v]); }
            }
            prop_assert!(lists_aligned(&graph));
        }
    }

    #[test]
    fn undirected_lists_stay_aligned_and_deduplicated(ops in arb_ops()) {
        let names = names(MAX_VERTICES);
        let mut graph = UndirectedGraph::new();
        for op in ops {
            match op {
                Op::AddEdge(a, b) => { let _ = graph.add_edge(&names[a], &names[b], 1.0); }
                Op::RemoveEdge(a, b) => { graph.remove_edge(&names[a], &names[b]); }
                Op::RemoveVertex(v) => { graph.remove_vertex(&names[v]); }
                Op::AddVertex(v) => { let _ = graph.add_vertex(&names[v]); }
            }
            prop_assert!(lists_aligned(&graph));

            let mut seen = std::collections::HashSet::new();
            for (a, b, _) in graph.edges() {
                let key = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(seen.insert(key), "pair {:?} stored twice", key);
            }
        }
    }

    #[test]
    fn reversed_add_is_idempotent((n, edges) in arb_edges()) {
        let mut graph = build_undirected(n, &edges);
        let before = graph.clone();
        let names = names(n);
        for &(a, b) in &edges {
            prop_assert_eq!(graph.add_edge(&names[b], &names[a], 3.0), Ok(false));
        }
        prop_assert_eq!(graph, before);
    }

    #[test]
    fn reported_cycles_are_long_simple_and_chordless((n, edges) in arb_edges()) {
        let graph = build_undirected(n, &edges);

        for cycle in find_cycles(&graph) {
            prop_assert!(cycle.len() >= 4);
            let distinct: std::collections::HashSet<&String> = cycle.iter().collect();
            prop_assert_eq!(distinct.len(), cycle.len());

            let len = cycle.len();
            for i in 0..len {
                for j in (i + 1)..len {
                    let consecutive = j == i + 1 || (i == 0 && j == len - 1);
                    prop_assert_eq!(
                        graph.contains_edge(&cycle[i], &cycle[j]),
                        consecutive,
                        "cycle {:?}: pair ({}, {})", cycle, cycle[i], cycle[j]
                    );
                }
            }
        }
    }

    #[test]
    fn cycle_search_agrees_with_chordality((n, edges) in arb_edges()) {
        let graph = build_undirected(n, &edges);
        prop_assert_eq!(find_cycles(&graph).is_empty(), is_chordal(&graph));
    }

    #[test]
    fn triangulation_yields_a_chordal_supergraph((n, edges) in arb_edges()) {
        let graph = build_undirected(n, &edges);
        let original: Vec<(String, String)> = graph
            .edges()
            .map(|(a, b, _)| (a.to_string(), b.to_string()))
            .collect();

        let result = triangulate_with(graph, TriangulateOptions::default());

        prop_assert!(result.converged);
        prop_assert!(is_chordal(&result.graph));
        prop_assert!(find_cycles(&result.graph).is_empty());
        for (a, b) in &original {
            prop_assert!(result.graph.contains_edge(a, b));
        }
        prop_assert_eq!(result.graph.edge_count(), original.len() + result.fill_count());
    }

    #[test]
    fn moralized_random_dags_triangulate(n in 1..=MAX_VERTICES, p in 0.0f64..0.6, seed in any::<u64>()) {
        let graph = random_dag(n, p, seed);
        let moralized = moralize(&graph);

        prop_assert_eq!(moralized.skeleton.vertex_count(), n);
        prop_assert!(moralized.skeleton.edge_count() <= moralized.moral.edge_count());

        let result = triangulate_with(moralized.moral, TriangulateOptions::default());
        prop_assert!(is_chordal(&result.graph));
    }
}
