//! `mgraph stats` — graph statistics at every pipeline stage.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use moralgraph_core::{GraphStats, moralize, triangulate_with};
use serde::Serialize;
use tracing::instrument;

use super::load_input;
use crate::config::Config;
use crate::output::{OutputMode, render, rule};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Graph description (JSON).
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct StatsOutput {
    directed: GraphStats,
    skeleton: GraphStats,
    moral: GraphStats,
    triangulated: GraphStats,
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn run_stats(args: &StatsArgs, config: &Config, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_input(&args.file, config, output)?;
    let payload = collect(&graph, config);
    render(output, &payload, render_stats_human)
}

fn collect(graph: &moralgraph_core::DirectedGraph, config: &Config) -> StatsOutput {
    let moralized = moralize(graph);
    let skeleton = GraphStats::from_undirected(&moralized.skeleton);
    let moral = GraphStats::from_undirected(&moralized.moral);
    let triangulated = triangulate_with(moralized.moral, config.triangulate.options());

    StatsOutput {
        directed: GraphStats::from_directed(graph),
        skeleton,
        moral,
        triangulated: GraphStats::from_undirected(&triangulated.graph),
    }
}

fn render_stats_human(payload: &StatsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let stages = [
        ("directed", &payload.directed),
        ("skeleton", &payload.skeleton),
        ("moral", &payload.moral),
        ("triangulated", &payload.triangulated),
    ];

    writeln!(
        w,
        "{:<13} {:>8} {:>8} {:>8} {:>6} {:>8} {:>6} {:>8}",
        "stage", "vertices", "edges", "density", "comps", "isolated", "maxdeg", "chordal"
    )?;
    rule(w)?;
    for (name, stats) in stages {
        let chordal = match stats.chordal {
            Some(true) => "yes",
            Some(false) => "no",
            None => "-",
        };
        writeln!(
            w,
            "{:<13} {:>8} {:>8} {:>8.3} {:>6} {:>8} {:>6} {:>8}",
            name,
            stats.vertex_count,
            stats.edge_count,
            stats.density,
            stats.component_count,
            stats.isolated_vertex_count,
            stats.max_degree,
            chordal
        )?;
    }
    Ok(())
}
