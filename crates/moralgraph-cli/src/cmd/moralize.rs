//! `mgraph moralize` — print the skeleton and moral graph of a DAG.

use std::collections::HashSet;
use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use moralgraph_core::{Change, ChangeKind, Graph, Moralized, UndirectedGraph, moralize};
use serde::Serialize;
use tracing::instrument;

use super::{EdgeRow, load_input};
use crate::config::Config;
use crate::output::{OutputMode, render, section};

#[derive(Args, Debug)]
pub struct MoralizeArgs {
    /// Graph description (JSON).
    pub file: PathBuf,

    /// Also print the moral graph's change log.
    #[arg(long)]
    pub history: bool,
}

#[derive(Debug, Serialize)]
struct MoralizeOutput {
    vertices: Vec<String>,
    skeleton: Vec<EdgeRow>,
    moral: Vec<EdgeRow>,
    /// Moral edges that are not in the skeleton.
    married: Vec<EdgeRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    history: Option<Vec<Change>>,
}

impl MoralizeOutput {
    fn build(moralized: &Moralized, history: bool) -> Self {
        let Moralized { skeleton, moral } = moralized;
        Self {
            vertices: moral.vertices().iter().cloned().collect(),
            skeleton: EdgeRow::rows(skeleton),
            moral: EdgeRow::rows(moral),
            married: married_edges(skeleton, moral),
            history: history.then(|| moral.history().records().to_vec()),
        }
    }
}

fn married_edges(skeleton: &UndirectedGraph, moral: &UndirectedGraph) -> Vec<EdgeRow> {
    let base: HashSet<(&str, &str)> = skeleton.edges().map(|(a, b, _)| (a, b)).collect();
    EdgeRow::rows(moral)
        .into_iter()
        .filter(|row| {
            let (a, b) = (row.source.as_str(), row.target.as_str());
            !base.contains(&(a, b)) && !base.contains(&(b, a))
        })
        .collect()
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn run_moralize(args: &MoralizeArgs, config: &Config, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_input(&args.file, config, output)?;
    let payload = MoralizeOutput::build(&moralize(&graph), args.history);
    render(output, &payload, render_moralize_human)
}

fn render_edges(w: &mut dyn Write, edges: &[EdgeRow]) -> std::io::Result<()> {
    if edges.is_empty() {
        return writeln!(w, "  (none)");
    }
    for edge in edges {
        writeln!(w, "  {} – {}", edge.source, edge.target)?;
    }
    Ok(())
}

fn render_moralize_human(payload: &MoralizeOutput, w: &mut dyn Write) -> std::io::Result<()> {
    section(w, &format!("Skeleton ({} edges)", payload.skeleton.len()))?;
    render_edges(w, &payload.skeleton)?;

    writeln!(w)?;
    section(w, &format!("Moral graph ({} edges)", payload.moral.len()))?;
    render_edges(w, &payload.moral)?;

    writeln!(w)?;
    writeln!(w, "Married parents: {}", payload.married.len())?;
    render_edges(w, &payload.married)?;

    if let Some(history) = &payload.history {
        writeln!(w)?;
        section(w, &format!("Moral graph history ({} records)", history.len()))?;
        for change in history {
            writeln!(
                w,
                "  {} {} {} {} {}",
                change.marker().as_u8(),
                kind_label(change),
                change.source,
                change.target,
                change.weight
            )?;
        }
    }
    Ok(())
}

const fn kind_label(change: &Change) -> &'static str {
    match change.kind {
        ChangeKind::VertexAdded => "vertex+",
        ChangeKind::VertexRemoved => "vertex-",
        ChangeKind::EdgeAdded => "edge+",
        ChangeKind::EdgeRemoved => "edge-",
    }
}
