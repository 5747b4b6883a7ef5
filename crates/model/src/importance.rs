//! Label-mapped global feature-importance ranking
//!
//! Importances are computed once at fit time from impurity decrease, so
//! every prediction from the same trained model carries the same ranking.
//! The explanation is model-level, not instance-level.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Feature-importance ranking sorted ascending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceRanking {
    entries: Vec<(String, f64)>,
}

impl ImportanceRanking {
    /// Build a ranking from schema-ordered scores, mapping each feature
    /// name through `label_of` and sorting ascending by score.
    pub fn from_scores<F>(schema: &[String], scores: &[f64], label_of: F) -> Self
    where
        F: Fn(&str) -> String,
    {
        let mut entries: Vec<(String, f64)> = schema
            .iter()
            .zip(scores.iter())
            .map(|(name, &score)| (label_of(name), score))
            .collect();

        // Stable order on ties so the ranking is reproducible
        entries.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        Self { entries }
    }

    /// All (label, score) pairs, ascending by score
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    /// The `n` highest-scoring entries, descending
    pub fn top(&self, n: usize) -> Vec<(String, f64)> {
        self.entries.iter().rev().take(n).cloned().collect()
    }

    /// Sum of all scores; 1.0 for a normalized ranking
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, score)| score).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
