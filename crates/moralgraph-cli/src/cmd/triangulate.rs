//! `mgraph triangulate` — moralize, then fill in until chordal.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use moralgraph_core::{Graph, GraphSnapshot, Triangulation, is_chordal, moralize, triangulate_with};
use serde::Serialize;
use tracing::{info, instrument};

use super::load_input;
use crate::config::Config;
use crate::output::{OutputMode, kv, render, section};

#[derive(Args, Debug)]
pub struct TriangulateArgs {
    /// Graph description (JSON).
    pub file: PathBuf,

    /// Write a snapshot of the triangulated graph to this file.
    #[arg(long, value_name = "OUT.json")]
    pub export: Option<PathBuf>,

    /// Stop after this many passes (overrides `[triangulate] max_passes`).
    #[arg(long)]
    pub max_passes: Option<usize>,
}

#[derive(Debug, Serialize)]
struct FillEdge {
    a: String,
    b: String,
}

#[derive(Debug, Serialize)]
struct TriangulateOutput {
    vertex_count: usize,
    moral_edge_count: usize,
    edge_count: usize,
    fill_edges: Vec<FillEdge>,
    passes: usize,
    converged: bool,
    chordal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported: Option<String>,
}

impl TriangulateOutput {
    fn build(moral_edge_count: usize, result: &Triangulation, exported: Option<String>) -> Self {
        Self {
            vertex_count: result.graph.vertex_count(),
            moral_edge_count,
            edge_count: result.graph.edge_count(),
            fill_edges: result
                .fill_edges
                .iter()
                .map(|(a, b)| FillEdge {
                    a: a.clone(),
                    b: b.clone(),
                })
                .collect(),
            passes: result.passes,
            converged: result.converged,
            chordal: is_chordal(&result.graph),
            exported,
        }
    }
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn run_triangulate(
    args: &TriangulateArgs,
    config: &Config,
    output: OutputMode,
) -> anyhow::Result<()> {
    let graph = load_input(&args.file, config, output)?;
    let moral = moralize(&graph).moral;
    let moral_edge_count = moral.edge_count();

    let mut options = config.triangulate.options();
    if args.max_passes.is_some() {
        options.max_passes = args.max_passes;
    }
    let result = triangulate_with(moral, options);

    let exported = match &args.export {
        Some(path) => {
            let json = GraphSnapshot::from_graph(&result.graph).to_json()?;
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "wrote snapshot");
            Some(path.display().to_string())
        }
        None => None,
    };

    let payload = TriangulateOutput::build(moral_edge_count, &result, exported);
    render(output, &payload, render_triangulate_human)
}

fn render_triangulate_human(payload: &TriangulateOutput, w: &mut dyn Write) -> std::io::Result<()> {
    section(w, "Triangulation")?;
    kv(w, "vertices", payload.vertex_count.to_string())?;
    kv(
        w,
        "edges",
        format!("{} (moral {})", payload.edge_count, payload.moral_edge_count),
    )?;
    kv(w, "passes", payload.passes.to_string())?;
    kv(w, "chordal", yes_no(payload.chordal))?;
    if !payload.converged {
        kv(w, "converged", "no (pass limit reached)")?;
    }
    if let Some(path) = &payload.exported {
        kv(w, "snapshot", path)?;
    }

    writeln!(w)?;
    writeln!(w, "Fill edges ({})", payload.fill_edges.len())?;
    for edge in &payload.fill_edges {
        writeln!(w, "  {} – {}", edge.a, edge.b)?;
    }
    Ok(())
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
