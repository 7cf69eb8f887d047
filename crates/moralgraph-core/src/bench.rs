//! Wall-clock measurement harness for the pipeline stages.
//!
//! # Overview
//!
//! An [`Algorithm`] is prepared for a problem size and then executed while
//! a timer runs. [`estimate`] repeats that for each size in a
//! [`SizeRange`] and folds the samples for one size into a single
//! [`Measurement`] with an [`Averager`]:
//!
//! - [`TrimmedMean`] sorts the samples, keeps the fastest `keep_fraction`
//!   of them (at least one) and averages what it kept.
//! - [`Median`] takes the upper median.
//!
//! Only wall-clock time is measured; per-trial process memory is not
//! sampled, so `mgraph bench` reports time alone.
//!
//! Preparation is not timed. The generators at the bottom build the
//! workloads: [`complete_digraph`] for moralization, [`ring`] for
//! triangulation and [`random_dag`] for property tests and criterion.

use std::hint::black_box;
use std::io::{self, Write};
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::graph::{DirectedGraph, Graph, UndirectedGraph};
use crate::moralize::moralize;
use crate::triangulate::triangulate;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// A workload the harness can size and time.
pub trait Algorithm {
    fn name(&self) -> &'static str;

    /// Build the input for `size`. Not timed.
    fn prepare(&mut self, size: usize);

    /// Run the timed part on the prepared input.
    fn execute(&mut self);
}

/// Folds repeated timing samples into one representative value.
pub trait Averager {
    /// Returns [`Duration::ZERO`] for an empty sample set.
    fn calculate(&self, samples: &[Duration]) -> Duration;
}

// ---------------------------------------------------------------------------
// Averagers
// ---------------------------------------------------------------------------

/// Mean of the fastest `keep_fraction` of the samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimmedMean {
    keep_fraction: f64,
}

impl TrimmedMean {
    pub const DEFAULT_KEEP_FRACTION: f64 = 0.8;

    #[must_use]
    pub const fn new(keep_fraction: f64) -> Self {
        Self { keep_fraction }
    }

    #[must_use]
    pub const fn keep_fraction(&self) -> f64 {
        self.keep_fraction
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn kept(&self, len: usize) -> usize {
        let wanted = if self.keep_fraction.is_finite() {
            (len as f64 * self.keep_fraction).round().max(0.0) as usize
        } else {
            len
        };
        wanted.clamp(1, len)
    }
}

impl Default for TrimmedMean {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEEP_FRACTION)
    }
}

impl Averager for TrimmedMean {
    fn calculate(&self, samples: &[Duration]) -> Duration {
        if samples.is_empty() {
            return Duration::ZERO;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();

        let kept = &sorted[..self.kept(sorted.len())];
        let total: u128 = kept.iter().map(Duration::as_nanos).sum();
        let mean = total / kept.len() as u128;
        Duration::from_nanos(u64::try_from(mean).unwrap_or(u64::MAX))
    }
}

/// Upper median: the middle sample, or the later of the two middle ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Median;

impl Averager for Median {
    fn calculate(&self, samples: &[Duration]) -> Duration {
        let mut sorted = samples.to_vec();
        sorted.sort_unstable();
        sorted.get(sorted.len() / 2).copied().unwrap_or(Duration::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Estimation
// ---------------------------------------------------------------------------

/// Inclusive range of problem sizes, walked in `step` increments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl SizeRange {
    #[must_use]
    pub const fn new(start: usize, end: usize, step: usize) -> Self {
        Self { start, end, step }
    }

    /// Sizes in ascending order; a zero step is treated as one.
    pub fn iter(&self) -> impl Iterator<Item = usize> + use<> {
        (self.start..=self.end).step_by(self.step.max(1))
    }
}

impl Default for SizeRange {
    fn default() -> Self {
        Self::new(1, 10, 1)
    }
}

/// Averaged timing for one problem size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Measurement {
    pub size: usize,
    pub time: Duration,
}

/// Time `algorithm` over every size in `sizes`.
///
/// Each size is prepared and executed `repetitions` times; zero repetitions
/// yields [`Duration::ZERO`] for every size.
#[instrument(skip_all, fields(algorithm = algorithm.name(), repetitions = repetitions))]
pub fn estimate(
    algorithm: &mut dyn Algorithm,
    sizes: SizeRange,
    repetitions: usize,
    averager: &dyn Averager,
) -> Vec<Measurement> {
    let mut measurements = Vec::new();
    let mut samples = Vec::with_capacity(repetitions);

    for size in sizes.iter() {
        samples.clear();
        for _ in 0..repetitions {
            algorithm.prepare(size);
            let start = Instant::now();
            algorithm.execute();
            samples.push(start.elapsed());
        }
        let time = averager.calculate(&samples);
        debug!(size, micros = time.as_micros(), "measured");
        measurements.push(Measurement { size, time });
    }

    measurements
}

/// Write measurements as `size;microseconds` lines followed by a blank
/// line.
///
/// # Errors
///
/// Propagates write failures.
pub fn write_results(out: &mut dyn Write, measurements: &[Measurement]) -> io::Result<()> {
    for m in measurements {
        writeln!(out, "{};{}", m.size, m.time.as_micros())?;
    }
    writeln!(out)
}

// ---------------------------------------------------------------------------
// Workloads
// ---------------------------------------------------------------------------

/// Moralization of [`complete_digraph`] inputs.
#[derive(Debug, Default)]
pub struct MoralizationBench {
    input: DirectedGraph,
}

impl Algorithm for MoralizationBench {
    fn name(&self) -> &'static str {
        "moralize"
    }

    fn prepare(&mut self, size: usize) {
        self.input = complete_digraph(size);
    }

    fn execute(&mut self) {
        black_box(moralize(&self.input));
    }
}

/// Triangulation of [`ring`] inputs.
#[derive(Debug, Default)]
pub struct TriangulationBench {
    input: Option<UndirectedGraph>,
}

impl Algorithm for TriangulationBench {
    fn name(&self) -> &'static str {
        "triangulate"
    }

    fn prepare(&mut self, size: usize) {
        self.input = Some(ring(size));
    }

    fn execute(&mut self) {
        if let Some(graph) = self.input.take() {
            black_box(triangulate(graph));
        }
    }
}

/// Directed graph on `A0..A(n-1)` with an edge for every ordered pair of
/// distinct vertices.
#[must_use]
pub fn complete_digraph(n: usize) -> DirectedGraph {
    let mut graph = DirectedGraph::without_history();
    let names: Vec<String> = (0..n).map(|i| format!("A{i}")).collect();
    graph.init_vertices(names.iter().cloned());
    for a in &names {
        for b in &names {
            if a != b {
                graph.insert_edge(a, b, 0.0);
            }
        }
    }
    graph
}

/// Random DAG on `A0..A(n-1)`: each pair `i < j` gets an edge `Ai → Aj`
/// with probability `edge_probability`.
#[must_use]
pub fn random_dag(n: usize, edge_probability: f64, seed: u64) -> DirectedGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let p = if edge_probability.is_nan() {
        0.0
    } else {
        edge_probability.clamp(0.0, 1.0)
    };

    let mut graph = DirectedGraph::without_history();
    let names: Vec<String> = (0..n).map(|i| format!("A{i}")).collect();
    graph.init_vertices(names.iter().cloned());
    for (i, a) in names.iter().enumerate() {
        for b in &names[i + 1..] {
            if rng.gen_bool(p) {
                graph.insert_edge(a, b, 0.0);
            }
        }
    }
    graph
}

/// Undirected cycle `A0–A1–…–A(n-1)–A0`. Fewer than three vertices give a
/// path.
#[must_use]
pub fn ring(n: usize) -> UndirectedGraph {
    let mut graph = UndirectedGraph::without_history();
    let names: Vec<String> = (0..n).map(|i| format!("A{i}")).collect();
    graph.init_vertices(names.iter().cloned());
    for (i, a) in names.iter().enumerate() {
        let b = &names[(i + 1) % n];
        if a != b {
            graph.insert_edge(a, b, 0.0);
        }
    }
    debug_assert_eq!(graph.vertex_count(), n);
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::is_acyclic;

    fn ms(values: &[u64]) -> Vec<Duration> {
        values.iter().copied().map(Duration::from_millis).collect()
    }

    #[test]
    fn trimmed_mean_drops_the_slowest_samples() {
        let averager = TrimmedMean::default();
        // 5 samples at 0.8 keep the fastest 4.
        let time = averager.calculate(&ms(&[40, 10, 1000, 20, 30]));
        assert_eq!(time, Duration::from_millis(25));
    }

    #[test]
    fn trimmed_mean_keeps_at_least_one_sample() {
        let averager = TrimmedMean::new(0.0);
        assert_eq!(averager.calculate(&ms(&[7, 3])), Duration::from_millis(3));
        assert_eq!(averager.calculate(&[]), Duration::ZERO);
    }

    #[test]
    fn median_takes_upper_middle() {
        assert_eq!(Median.calculate(&ms(&[5, 1, 3])), Duration::from_millis(3));
        assert_eq!(Median.calculate(&ms(&[4, 1, 3, 2])), Duration::from_millis(3));
        assert_eq!(Median.calculate(&[]), Duration::ZERO);
    }

    #[test]
    fn size_range_steps_inclusively() {
        let sizes: Vec<usize> = SizeRange::new(2, 8, 3).iter().collect();
        assert_eq!(sizes, [2, 5, 8]);
        let zero_step: Vec<usize> = SizeRange::new(1, 3, 0).iter().collect();
        assert_eq!(zero_step, [1, 2, 3]);
    }

    #[derive(Default)]
    struct Counting {
        prepared: Vec<usize>,
        executed: usize,
    }

    impl Algorithm for Counting {
        fn name(&self) -> &'static str {
            "counting"
        }

        fn prepare(&mut self, size: usize) {
            self.prepared.push(size);
        }

        fn execute(&mut self) {
            self.executed += 1;
        }
    }

    #[test]
    fn estimate_prepares_before_every_repetition() {
        let mut algorithm = Counting::default();

        let results = estimate(&mut algorithm, SizeRange::new(1, 3, 1), 2, &Median);

        assert_eq!(algorithm.prepared, [1, 1, 2, 2, 3, 3]);
        assert_eq!(algorithm.executed, 6);
        let sizes: Vec<usize> = results.iter().map(|m| m.size).collect();
        assert_eq!(sizes, [1, 2, 3]);
    }

    #[test]
    fn results_use_size_semicolon_micros() {
        let mut out = Vec::new();
        let measurements = [
            Measurement {
                size: 1,
                time: Duration::from_micros(12),
            },
            Measurement {
                size: 2,
                time: Duration::from_millis(3),
            },
        ];

        write_results(&mut out, &measurements).expect("write to vec");

        assert_eq!(String::from_utf8(out).expect("utf8"), "1;12\n2;3000\n\n");
    }

    #[test]
    fn complete_digraph_has_every_ordered_pair() {
        let graph = complete_digraph(4);
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 12);
        assert!(graph.history().is_empty());
    }

    #[test]
    fn random_dag_is_acyclic_and_reproducible() {
        let first = random_dag(12, 0.4, 7);
        let second = random_dag(12, 0.4, 7);

        assert!(is_acyclic(&first));
        assert_eq!(first, second);
        assert_eq!(random_dag(5, 1.0, 0).edge_count(), 10);
        assert_eq!(random_dag(5, 0.0, 0).edge_count(), 0);
    }

    #[test]
    fn generators_keep_every_vertex_in_order() {
        let sparse = random_dag(4, 0.0, 3);
        let order: Vec<&str> = sparse.vertices().iter().map(String::as_str).collect();
        assert_eq!(order, ["A0", "A1", "A2", "A3"]);

        let complete = complete_digraph(3);
        assert_eq!(complete.successors("A1"), ["A0", "A2"]);
        assert_eq!(complete.predecessors("A1"), ["A0", "A2"]);
    }

    #[test]
    fn ring_closes_back_to_start() {
        let graph = ring(5);
        assert_eq!(graph.edge_count(), 5);
        assert!(graph.contains_edge("A4", "A0"));
        assert_eq!(ring(1).edge_count(), 0);
        assert_eq!(ring(0).vertex_count(), 0);
    }

    #[test]
    fn workloads_run_through_the_harness() {
        let sizes = SizeRange::new(3, 5, 1);
        let moral = estimate(&mut MoralizationBench::default(), sizes, 2, &TrimmedMean::default());
        let tri = estimate(&mut TriangulationBench::default(), sizes, 2, &Median);
        assert_eq!(moral.len(), 3);
        assert_eq!(tri.len(), 3);
    }
}
