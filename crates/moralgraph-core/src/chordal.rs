//! Chordality check by maximum cardinality search.
//!
//! Independent of the cycle finder: used to verify that triangulation output
//! really is chordal. Maximum cardinality search numbers vertices from last
//! to first, always picking the unnumbered vertex with the most numbered
//! neighbors. The graph is chordal iff the resulting order is a perfect
//! elimination ordering: for every vertex, its neighbors that come later in
//! the order form a clique. Quadratic in the vertex count.

use std::collections::{HashMap, HashSet};

use crate::graph::{Graph, UndirectedGraph};

/// Whether every cycle longer than three vertices in `graph` has a chord.
#[must_use]
pub fn is_chordal(graph: &UndirectedGraph) -> bool {
    perfect_elimination_order(graph).is_some()
}

/// A perfect elimination ordering of `graph`, or `None` if it is not chordal.
///
/// The first vertex in the returned order is eliminated first. Ties in the
/// search are broken by vertex insertion order, so the result is
/// deterministic.
#[must_use]
pub fn perfect_elimination_order(graph: &UndirectedGraph) -> Option<Vec<String>> {
    let names: Vec<&str> = graph.vertices().iter().map(String::as_str).collect();
    let index: HashMap<&str, usize> = names.iter().enumerate().map(|(i, n)| (*n, i)).collect();

    let n = names.len();
    let mut adjacency: Vec<HashSet<usize>> = vec![HashSet::new(); n];
    for (source, target, _) in graph.edge_list().iter() {
        let (Some(&a), Some(&b)) = (index.get(source), index.get(target)) else {
            continue;
        };
        if a != b {
            adjacency[a].insert(b);
            adjacency[b].insert(a);
        }
    }

    let order = maximum_cardinality_search(&adjacency);

    let mut position = vec![0usize; n];
    for (pos, &v) in order.iter().enumerate() {
        position[v] = pos;
    }

    for &v in &order {
        let later: Vec<usize> = adjacency[v]
            .iter()
            .copied()
            .filter(|&u| position[u] > position[v])
            .collect();
        let Some(&parent) = later.iter().min_by_key(|&&u| position[u]) else {
            continue;
        };
        if later
            .iter()
            .any(|&u| u != parent && !adjacency[parent].contains(&u))
        {
            return None;
        }
    }

    Some(order.into_iter().map(|v| names[v].to_string()).collect())
}

/// Elimination order (first eliminated first) produced by MCS.
fn maximum_cardinality_search(adjacency: &[HashSet<usize>]) -> Vec<usize> {
    let n = adjacency.len();
    let mut weight = vec![0usize; n];
    let mut numbered = vec![false; n];
    let mut order = vec![0usize; n];

    for slot in (0..n).rev() {
        let mut best: Option<usize> = None;
        for v in 0..n {
            if numbered[v] {
                continue;
            }
            if best.is_none_or(|b| weight[v] > weight[b]) {
                best = Some(v);
            }
        }
        let Some(v) = best else { break };
        numbered[v] = true;
        order[slot] = v;
        for &u in &adjacency[v] {
            if !numbered[u] {
                weight[u] += 1;
            }
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undirected(vertices: &[&str], edges: &[(&str, &str)]) -> UndirectedGraph {
        let mut graph = UndirectedGraph::new();
        for v in vertices {
            graph.add_vertex(v).expect("vertex");
        }
        for (a, b) in edges {
            graph.add_edge(a, b, 0.0).expect("edge");
        }
        graph
    }

    #[test]
    fn empty_and_trivial_graphs_are_chordal() {
        assert!(is_chordal(&UndirectedGraph::new()));
        assert!(is_chordal(&undirected(&["A"], &[])));
        assert!(is_chordal(&undirected(&["A", "B"], &[("A", "B")])));
    }

    #[test]
    fn trees_and_triangles_are_chordal() {
        assert!(is_chordal(&undirected(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("A", "C"), ("C", "D")]
        )));
        assert!(is_chordal(&undirected(
            &["A", "B", "C"],
            &[("A", "B"), ("B", "C"), ("C", "A")]
        )));
    }

    #[test]
    fn chordless_square_is_not_chordal() {
        let square = undirected(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")],
        );
        assert!(!is_chordal(&square));
        assert!(perfect_elimination_order(&square).is_none());
    }

    #[test]
    fn square_with_chord_is_chordal() {
        let graph = undirected(
            &["A", "B", "C", "D"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A"), ("A", "C")],
        );
        let order = perfect_elimination_order(&graph).expect("chordal");
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn pentagon_with_one_chord_is_not_chordal() {
        let graph = undirected(
            &["A", "B", "C", "D", "E"],
            &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "E"), ("E", "A"), ("A", "C")],
        );
        assert!(!is_chordal(&graph));
    }
}
