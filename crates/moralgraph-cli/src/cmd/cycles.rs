//! `mgraph cycles` — list the chordless cycles of the moral graph.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use moralgraph_core::{find_cycles, moralize};
use serde::Serialize;
use tracing::instrument;

use super::load_input;
use crate::config::Config;
use crate::output::{OutputMode, render};

#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// Graph description (JSON).
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<Vec<String>>,
}

#[instrument(skip_all, fields(file = %args.file.display()))]
pub fn run_cycles(args: &CyclesArgs, config: &Config, output: OutputMode) -> anyhow::Result<()> {
    let graph = load_input(&args.file, config, output)?;
    let moral = moralize(&graph).moral;
    let payload = CyclesOutput {
        cycles: find_cycles(&moral),
    };
    render(output, &payload, render_cycles_human)
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No chordless cycles found; the moral graph is chordal.")?;
        return Ok(());
    }

    writeln!(w, "Chordless cycles ({})", payload.cycles.len())?;
    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "  {:>3}. {}", idx + 1, cycle.join(" – "))?;
    }
    Ok(())
}
