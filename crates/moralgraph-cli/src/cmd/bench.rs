//! `mgraph bench` — time a pipeline stage across problem sizes.

use std::io::Write;

use clap::{Args, ValueEnum};
use moralgraph_core::bench::{
    Algorithm, Measurement, MoralizationBench, TriangulationBench, estimate, write_results,
};
use serde::Serialize;
use tracing::instrument;

use crate::config::{BenchConfig, Config, EstimatorKind};
use crate::output::{OutputMode, render};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlgorithmKind {
    /// Moralize complete digraphs on `n` vertices.
    #[default]
    Moralize,
    /// Triangulate `n`-vertex rings.
    Triangulate,
}

impl AlgorithmKind {
    fn instance(self) -> Box<dyn Algorithm> {
        match self {
            Self::Moralize => Box::new(MoralizationBench::default()),
            Self::Triangulate => Box::new(TriangulationBench::default()),
        }
    }
}

#[derive(Args, Debug)]
pub struct BenchArgs {
    #[arg(long, value_enum, default_value_t = AlgorithmKind::Moralize)]
    pub algorithm: AlgorithmKind,

    /// Override `[bench] estimator`.
    #[arg(long, value_enum)]
    pub estimator: Option<EstimatorKind>,

    /// Override `[bench] end`.
    #[arg(long)]
    pub end: Option<usize>,
}

#[derive(Debug, Serialize)]
struct MeasurementRow {
    size: usize,
    time_us: u128,
}

#[derive(Debug, Serialize)]
struct BenchOutput {
    algorithm: AlgorithmKind,
    estimator: EstimatorKind,
    repetitions: usize,
    measurements: Vec<MeasurementRow>,
    #[serde(skip)]
    raw: Vec<Measurement>,
}

fn effective_config(args: &BenchArgs, config: &Config) -> BenchConfig {
    let mut bench = config.bench.clone();
    if let Some(estimator) = args.estimator {
        bench.estimator = estimator;
    }
    if let Some(end) = args.end {
        bench.end = end;
    }
    bench
}

#[instrument(skip_all, fields(algorithm = ?args.algorithm))]
pub fn run_bench(args: &BenchArgs, config: &Config, output: OutputMode) -> anyhow::Result<()> {
    let bench = effective_config(args, config);
    let mut algorithm = args.algorithm.instance();

    let raw = estimate(
        algorithm.as_mut(),
        bench.sizes(),
        bench.repetitions,
        bench.averager().as_ref(),
    );

    let payload = BenchOutput {
        algorithm: args.algorithm,
        estimator: bench.estimator,
        repetitions: bench.repetitions,
        measurements: raw
            .iter()
            .map(|m| MeasurementRow {
                size: m.size,
                time_us: m.time.as_micros(),
            })
            .collect(),
        raw,
    };
    render(output, &payload, render_bench_human)
}

fn render_bench_human(payload: &BenchOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "size;time_us")?;
    write_results(w, &payload.raw)
}
