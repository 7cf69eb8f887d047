//! Parallel-list edge storage shared by both graph variants.
//!
//! Sources, targets and weights are three sequences of equal length. Every
//! mutator here touches all three, so callers cannot break the length
//! invariant.

use crate::error::GraphError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeList {
    source: Vec<String>,
    target: Vec<String>,
    weight: Vec<f64>,
}

impl EdgeList {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            source: Vec::new(),
            target: Vec::new(),
            weight: Vec::new(),
        }
    }

    /// Build from pre-existing parallel sequences.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::MalformedInput`] when the lengths differ.
    pub fn from_parallel(
        source: Vec<String>,
        target: Vec<String>,
        weight: Vec<f64>,
    ) -> Result<Self, GraphError> {
        if source.len() != target.len() || source.len() != weight.len() {
            return Err(GraphError::MalformedInput(format!(
                "edge lists differ in length: {} sources, {} targets, {} weights",
                source.len(),
                target.len(),
                weight.len()
            )));
        }
        Ok(Self {
            source,
            target,
            weight,
        })
    }

    pub fn push(&mut self, source: &str, target: &str, weight: f64) {
        self.source.push(source.to_string());
        self.target.push(target.to_string());
        self.weight.push(weight);
    }

    /// Remove the entry at `index`, returning its fields.
    pub fn remove_at(&mut self, index: usize) -> (String, String, f64) {
        (
            self.source.remove(index),
            self.target.remove(index),
            self.weight.remove(index),
        )
    }

    /// Remove every entry matching `pred`, scanning from the back.
    ///
    /// Returns the removed entries in removal order (last index first).
    pub fn remove_where(
        &mut self,
        mut pred: impl FnMut(&str, &str) -> bool,
    ) -> Vec<(String, String, f64)> {
        let mut removed = Vec::new();
        for index in (0..self.len()).rev() {
            if pred(&self.source[index], &self.target[index]) {
                removed.push(self.remove_at(index));
            }
        }
        removed
    }

    #[must_use]
    pub fn sources(&self) -> &[String] {
        &self.source
    }

    #[must_use]
    pub fn targets(&self) -> &[String] {
        &self.target
    }

    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weight
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Iterate `(source, target, weight)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, f64)> + '_ {
        self.source
            .iter()
            .zip(&self.target)
            .zip(&self.weight)
            .map(|((s, t), w)| (s.as_str(), t.as_str(), *w))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lengths(edges: &EdgeList) -> (usize, usize, usize) {
        (
            edges.sources().len(),
            edges.targets().len(),
            edges.weights().len(),
        )
    }

    #[test]
    fn from_parallel_rejects_mismatched_lengths() {
        let err = EdgeList::from_parallel(
            vec!["A".to_string()],
            vec!["B".to_string(), "C".to_string()],
            vec![0.0],
        )
        .unwrap_err();

        assert!(matches!(err, GraphError::MalformedInput(_)));
    }

    #[test]
    fn remove_where_removes_all_matches_and_keeps_lengths() {
        let mut edges = EdgeList::new();
        edges.push("A", "B", 1.0);
        edges.push("B", "C", 2.0);
        edges.push("A", "B", 3.0);

        let removed = edges.remove_where(|s, t| s == "A" && t == "B");

        assert_eq!(removed.len(), 2);
        assert!((removed[0].2 - 3.0).abs() < f64::EPSILON);
        assert_eq!(lengths(&edges), (1, 1, 1));
        assert_eq!(edges.iter().next(), Some(("B", "C", 2.0)));
    }
}
