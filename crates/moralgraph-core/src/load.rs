//! JSON graph descriptions.
//!
//! ```json
//! {
//!   "vertices": [
//!     { "name": "A" },
//!     { "name": "B" },
//!     { "name": "C", "incoming": [ { "name": "A", "weight": 0.5 }, { "name": "B" } ] }
//!   ]
//! }
//! ```
//!
//! Vertices are added in document order, so a neighbor entry may only name
//! a vertex declared earlier. `incoming` entries become edges into the
//! vertex, `outcoming` entries edges out of it. A missing `weight` is 0.
//! The first problem aborts the load and no graph is returned.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{GraphError, LoadError};
use crate::graph::{DirectedGraph, Graph, NeighborWeights};

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    vertices: Vec<VertexEntry>,
}

#[derive(Debug, Deserialize)]
struct VertexEntry {
    name: Option<String>,
    #[serde(default)]
    incoming: Option<Vec<NeighborEntry>>,
    #[serde(default)]
    outcoming: Option<Vec<NeighborEntry>>,
}

#[derive(Debug, Deserialize)]
struct NeighborEntry {
    name: Option<String>,
    weight: Option<f64>,
}

/// Parse a graph description from a JSON string.
///
/// # Errors
///
/// - [`LoadError::Json`] if the text is not a valid description document.
/// - [`LoadError::Graph`] with [`GraphError::MalformedInput`] for a missing
///   name or a neighbor listed twice in one map.
/// - [`LoadError::Graph`] with [`GraphError::DuplicateVertex`] or
///   [`GraphError::UnknownVertex`] from vertex insertion.
pub fn parse_json(text: &str, history: bool) -> Result<DirectedGraph, LoadError> {
    let document: Document = serde_json::from_str(text)?;
    build(document, history)
}

/// Like [`parse_json`], reading from any byte source.
///
/// # Errors
///
/// See [`parse_json`].
pub fn read_json(reader: impl Read, history: bool) -> Result<DirectedGraph, LoadError> {
    let document: Document = serde_json::from_reader(reader)?;
    build(document, history)
}

/// Load a graph description from a file.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be opened, otherwise see
/// [`parse_json`].
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_path(path: &Path, history: bool) -> Result<DirectedGraph, LoadError> {
    let file = File::open(path)?;
    read_json(BufReader::new(file), history)
}

fn build(document: Document, history: bool) -> Result<DirectedGraph, LoadError> {
    let mut graph = if history {
        DirectedGraph::new()
    } else {
        DirectedGraph::without_history()
    };

    for (index, entry) in document.vertices.into_iter().enumerate() {
        let name = entry
            .name
            .ok_or_else(|| GraphError::MalformedInput(format!("vertex #{index} has no `name`")))?;
        let incoming = neighbor_map(&name, "incoming", entry.incoming)?;
        let outcoming = neighbor_map(&name, "outcoming", entry.outcoming)?;
        graph.add_vertex_with_edges(&name, &incoming, &outcoming)?;
    }

    debug!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "loaded graph description"
    );
    Ok(graph)
}

fn neighbor_map(
    vertex: &str,
    field: &str,
    entries: Option<Vec<NeighborEntry>>,
) -> Result<NeighborWeights, GraphError> {
    let mut map = NeighborWeights::new();
    for (index, entry) in entries.unwrap_or_default().into_iter().enumerate() {
        let Some(name) = entry.name else {
            return Err(GraphError::MalformedInput(format!(
                "`{vertex}`.{field}[{index}] has no `name`"
            )));
        };
        if map.contains_key(&name) {
            return Err(GraphError::MalformedInput(format!(
                "`{vertex}`.{field} lists `{name}` more than once"
            )));
        }
        map.insert(name, entry.weight.unwrap_or(0.0));
    }
    Ok(map)
}
