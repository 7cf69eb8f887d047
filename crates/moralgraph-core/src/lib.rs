#![forbid(unsafe_code)]
//! moralgraph-core library.
//!
//! Moralization and triangulation of directed acyclic graphs, the first
//! stage of junction-tree construction.
//!
//! ```text
//! load ─→ DirectedGraph ─→ moralize ─→ skeleton, moral ─→ triangulate ─→ chordal graph
//!                                                            │
//!                                                            └─ find_cycles (per pass)
//! ```
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums ([`GraphError`], [`LoadError`]),
//!   each mapped to a stable [`ErrorCode`].
//! - **Logging**: `tracing` macros; pipeline entry points are
//!   `#[instrument]`ed. The library never installs a subscriber.
//! - **Ordering**: vertices and edges keep insertion order, so every
//!   algorithm here is deterministic for a given construction sequence.

pub mod bench;
pub mod chordal;
pub mod cycles;
pub mod error;
pub mod export;
pub mod graph;
pub mod load;
pub mod moralize;
pub mod stats;
pub mod triangulate;

pub use chordal::is_chordal;
pub use cycles::find_cycles;
pub use error::{ErrorCode, GraphError, LoadError};
pub use export::GraphSnapshot;
pub use graph::{
    Change, ChangeKind, ChangeLog, DirectedGraph, EdgeList, Graph, Marker, NeighborWeights,
    UndirectedGraph,
};
pub use moralize::{Moralized, moralize};
pub use stats::GraphStats;
pub use triangulate::{TriangulateOptions, Triangulation, triangulate, triangulate_with};
