//! Append-only change log recorded by graph mutators.
//!
//! Every structural mutation emits one [`Change`]. The log is never pruned
//! or rewritten; it exists so an external renderer can replay how a graph
//! was built. A disabled log accepts records and drops them, so mutators
//! emit unconditionally and never branch on whether history is kept.

use serde::Serialize;

/// Whether a record adds or removes structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    Added,
    Removed,
}

impl Marker {
    /// Numeric form used by replay consumers (`1` added, `0` removed).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Added => 1,
            Self::Removed => 0,
        }
    }
}

/// The kind of mutation a [`Change`] describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    VertexAdded,
    VertexRemoved,
    EdgeAdded,
    EdgeRemoved,
}

impl ChangeKind {
    #[must_use]
    pub const fn marker(self) -> Marker {
        match self {
            Self::VertexAdded | Self::EdgeAdded => Marker::Added,
            Self::VertexRemoved | Self::EdgeRemoved => Marker::Removed,
        }
    }
}

/// One record in a [`ChangeLog`].
///
/// Vertex records are self-referencing: `source == target == name` with a
/// weight of zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub source: String,
    pub target: String,
    pub weight: f64,
}

impl Change {
    #[must_use]
    pub const fn marker(&self) -> Marker {
        self.kind.marker()
    }
}

/// Ordered sequence of [`Change`] records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeLog {
    #[serde(skip)]
    enabled: bool,
    records: Vec<Change>,
}

impl Default for ChangeLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeLog {
    /// A log that keeps every record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: true,
            records: Vec::new(),
        }
    }

    /// A log that drops every record.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            records: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub(crate) fn vertex_added(&mut self, name: &str) {
        self.push(ChangeKind::VertexAdded, name, name, 0.0);
    }

    pub(crate) fn vertex_removed(&mut self, name: &str) {
        self.push(ChangeKind::VertexRemoved, name, name, 0.0);
    }

    pub(crate) fn edge_added(&mut self, source: &str, target: &str, weight: f64) {
        self.push(ChangeKind::EdgeAdded, source, target, weight);
    }

    pub(crate) fn edge_removed(&mut self, source: &str, target: &str) {
        self.push(ChangeKind::EdgeRemoved, source, target, 0.0);
    }

    fn push(&mut self, kind: ChangeKind, source: &str, target: &str, weight: f64) {
        if !self.enabled {
            return;
        }
        self.records.push(Change {
            kind,
            source: source.to_string(),
            target: target.to_string(),
            weight,
        });
    }

    #[must_use]
    pub fn records(&self) -> &[Change] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Change> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a Change;
    type IntoIter = std::slice::Iter<'a, Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
