//! Enumeration of inclusion-minimal cycles in an undirected graph.
//!
//! # Algorithm
//!
//! 1. Index vertices by their position in the graph's vertex order and
//!    build an adjacency list whose entries follow edge-list order.
//! 2. For every root vertex, run a backtracking DFS that walks simple paths
//!    and records each path that closes back on the root with at least two
//!    edges. The edge a path just arrived by may not be reused as the next
//!    step, which rules out the trivial `root → x → root` bounce.
//! 3. Each closed walk is keyed by its vertex sequence; a walk whose
//!    reversal was already recorded is the same cycle traversed backwards
//!    and is dropped.
//! 4. Cycles with identical vertex sets (rotations found from different
//!    roots) collapse to the first one found.
//! 5. Any cycle whose vertex set strictly contains another cycle's vertex
//!    set is dropped. A cycle with a chord always contains the two shorter
//!    cycles the chord creates, so the survivors are chordless.
//! 6. Triangles and shorter cycles are dropped last; they take part in
//!    step 5 but are never reported.
//!
//! Enumeration visits every simple cycle and is exponential in the worst
//! case. The DFS uses an explicit stack, so depth is bounded by the vertex
//! count without growing the call stack.

use std::collections::{BTreeSet, HashMap, HashSet};

use indexmap::IndexSet;
use tracing::{debug, instrument, trace};

use crate::graph::{Graph, UndirectedGraph};

/// Cycles shorter than this are never reported.
pub const MIN_CYCLE_LEN: usize = 4;

/// Find the chordless cycles of `graph` with at least [`MIN_CYCLE_LEN`]
/// vertices.
///
/// Each cycle lists its vertices in traversal order, starting from the
/// vertex whose search found it, without repeating the start at the end.
/// Output order is deterministic for a given vertex and edge order.
#[must_use]
#[instrument(skip(graph), fields(vertices = graph.vertex_count(), edges = graph.edge_count()))]
pub fn find_cycles(graph: &UndirectedGraph) -> Vec<Vec<String>> {
    let names: Vec<&str> = graph.vertices().iter().map(String::as_str).collect();
    let walks = CycleSearch::new(graph).run();
    let found = walks.len();

    let cycles = minimal_cycles(walks);
    debug!(walks = found, reported = cycles.len(), "cycle search complete");

    cycles
        .into_iter()
        .map(|cycle| cycle.into_iter().map(|v| names[v].to_string()).collect())
        .collect()
}

/// Steps 4–6: set dedup, inclusion-minimality, length filter.
fn minimal_cycles(walks: Vec<Vec<usize>>) -> Vec<Vec<usize>> {
    let mut seen: IndexSet<BTreeSet<usize>> = IndexSet::new();
    let mut unique: Vec<Vec<usize>> = Vec::new();
    for walk in walks {
        if seen.insert(walk.iter().copied().collect()) {
            unique.push(walk);
        }
    }

    unique
        .into_iter()
        .zip(seen.iter())
        .filter(|(_, set)| {
            !seen
                .iter()
                .any(|other| other.len() < set.len() && set.is_superset(other))
        })
        .map(|(walk, _)| walk)
        .filter(|walk| walk.len() >= MIN_CYCLE_LEN)
        .collect()
}

/// One frame of the explicit DFS stack.
struct Frame {
    vertex: usize,
    /// Edge id used to reach `vertex`; `None` for the root.
    via: Option<usize>,
    /// Next position to try in `adjacency[vertex]`.
    cursor: usize,
}

struct CycleSearch {
    /// `(neighbor, edge id)` pairs per vertex, in edge-list order.
    adjacency: Vec<Vec<(usize, usize)>>,
    /// Closed walks in discovery order, without the repeated root.
    walks: Vec<Vec<usize>>,
    keys: HashSet<Vec<usize>>,
}

impl CycleSearch {
    fn new(graph: &UndirectedGraph) -> Self {
        let index: HashMap<&str, usize> = graph
            .vertices()
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let mut adjacency = vec![Vec::new(); graph.vertex_count()];
        for (edge, (source, target, _)) in graph.edge_list().iter().enumerate() {
            let (Some(&a), Some(&b)) = (index.get(source), index.get(target)) else {
                continue;
            };
            // A self-loop closes with a single edge and is never a cycle here.
            if a == b {
                continue;
            }
            adjacency[a].push((b, edge));
            adjacency[b].push((a, edge));
        }

        Self {
            adjacency,
            walks: Vec::new(),
            keys: HashSet::new(),
        }
    }

    fn run(mut self) -> Vec<Vec<usize>> {
        for root in 0..self.adjacency.len() {
            self.search_from(root);
        }
        self.walks
    }

    fn search_from(&mut self, root: usize) {
        let mut on_path = vec![false; self.adjacency.len()];
        let mut path = vec![root];
        let mut stack = vec![Frame {
            vertex: root,
            via: None,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let current = frame.vertex;
            let Some(&(next, edge)) = self.adjacency[current].get(frame.cursor) else {
                stack.pop();
                path.pop();
                on_path[current] = false;
                continue;
            };
            frame.cursor += 1;

            if frame.via == Some(edge) {
                continue;
            }
            if next == root {
                if path.len() >= 2 {
                    self.record(&path);
                }
                continue;
            }
            if on_path[next] {
                continue;
            }

            on_path[next] = true;
            path.push(next);
            stack.push(Frame {
                vertex: next,
                via: Some(edge),
                cursor: 0,
            });
        }
    }

    /// Record a closed walk unless it or its reversal is already known.
    fn record(&mut self, path: &[usize]) {
        let mut key = path.to_vec();
        key.push(path[0]);

        let reversed: Vec<usize> = key.iter().rev().copied().collect();
        if self.keys.contains(&reversed) || !self.keys.insert(key) {
            return;
        }
        trace!(cycle = ?path, "recorded closed walk");
        self.walks.push(path.to_vec());
    }
}
