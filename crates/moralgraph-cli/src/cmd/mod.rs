pub mod bench;
pub mod cycles;
pub mod moralize;
pub mod stats;
pub mod triangulate;

use std::path::Path;

use moralgraph_core::load::load_path;
use moralgraph_core::{DirectedGraph, Graph};
use serde::Serialize;

use crate::config::Config;
use crate::output::{CliError, OutputMode, render_error};

/// One edge in command payloads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeRow {
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl EdgeRow {
    pub fn rows(graph: &impl Graph) -> Vec<Self> {
        graph
            .edges()
            .map(|(source, target, weight)| Self {
                source: source.to_string(),
                target: target.to_string(),
                weight,
            })
            .collect()
    }
}

/// Load the directed input graph, reporting load failures with their code.
pub fn load_input(path: &Path, config: &Config, output: OutputMode) -> anyhow::Result<DirectedGraph> {
    match load_path(path, config.graph.history) {
        Ok(graph) => Ok(graph),
        Err(err) => {
            let display = path.display().to_string();
            render_error(output, &CliError::from_load_error(&display, &err))?;
            Err(anyhow::Error::new(err).context(format!("failed to load {display}")))
        }
    }
}
