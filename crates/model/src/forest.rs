//! Random-forest container with deterministic probability inference
//!
//! A fitted forest owns its ordered feature schema, the tree ensemble, and
//! the global feature importances computed at training time. Forests are
//! immutable after fit: inference never mutates model state, so a shared
//! reference is safe across concurrent callers.

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::tree::Tree;

/// Metadata captured when a forest is fitted
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForestMetadata {
    /// Library version that produced the model
    pub version: String,
    /// Unix timestamp of the fit
    pub trained_at: i64,
    /// Number of trees in the ensemble
    pub tree_count: usize,
    /// Maximum tree depth used during construction
    pub max_depth: usize,
    /// Number of features in the schema
    pub feature_count: usize,
    /// Accuracy on the held-out split, in [0, 1]
    pub holdout_accuracy: f64,
}

/// A fitted classification forest
///
/// Leaves store positive-class fractions; the forest probability is their
/// mean across trees, so `predict_proba` always lands in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forest {
    /// Ordered feature names; inference inputs must follow this order
    pub schema: Vec<String>,

    /// Decision trees in the ensemble
    pub trees: Vec<Tree>,

    /// Global importance score per schema feature, summing to 1.0
    pub feature_importances: Vec<f64>,

    /// Fit metadata
    pub metadata: ForestMetadata,
}

impl Forest {
    /// Number of features the model was trained on
    pub fn n_features(&self) -> usize {
        self.schema.len()
    }

    /// Predict the positive-class probability for a schema-ordered feature
    /// vector.
    ///
    /// Pure function of the immutable model and the input: repeated calls
    /// with identical inputs return bit-identical probabilities.
    pub fn predict_proba(&self, features: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.0;
        }

        let mut sum = 0.0;
        for tree in &self.trees {
            sum += tree.evaluate(features);
        }

        sum / self.trees.len() as f64
    }

    /// Validate forest structure
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::ValidationFailed("forest has no trees".into()));
        }

        if self.feature_importances.len() != self.schema.len() {
            return Err(ModelError::ValidationFailed(format!(
                "importance length {} does not match schema length {}",
                self.feature_importances.len(),
                self.schema.len()
            )));
        }

        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| {
                ModelError::ValidationFailed(format!("tree {i} validation failed: {e}"))
            })?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Node;

    fn two_tree_forest() -> Forest {
        // Tree 1: feature[0] <= 50 -> 0.2, else 0.8
        let tree1 = Tree::new(vec![
            Node::internal(0, 50.0, 1, 2),
            Node::leaf(0.2),
            Node::leaf(0.8),
        ]);
        // Tree 2: feature[1] <= 30 -> 0.4, else 0.6
        let tree2 = Tree::new(vec![
            Node::internal(1, 30.0, 1, 2),
            Node::leaf(0.4),
            Node::leaf(0.6),
        ]);

        Forest {
            schema: vec!["a".into(), "b".into()],
            trees: vec![tree1, tree2],
            feature_importances: vec![0.5, 0.5],
            metadata: ForestMetadata {
                version: "test".into(),
                trained_at: 0,
                tree_count: 2,
                max_depth: 1,
                feature_count: 2,
                holdout_accuracy: 0.0,
            },
        }
    }

    #[test]
    fn test_forest_averages_tree_outputs() {
        let forest = two_tree_forest();

        // [30, 20]: tree1 -> 0.2, tree2 -> 0.4, mean 0.3
        assert!((forest.predict_proba(&[30.0, 20.0]) - 0.3).abs() < 1e-12);
        // [60, 40]: tree1 -> 0.8, tree2 -> 0.6, mean 0.7
        assert!((forest.predict_proba(&[60.0, 40.0]) - 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_probability_in_unit_interval() {
        let forest = two_tree_forest();
        for a in [0.0, 25.0, 50.0, 75.0, 200.0] {
            for b in [0.0, 30.0, 100.0] {
                let p = forest.predict_proba(&[a, b]);
                assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    #[test]
    fn test_repeated_inference_is_bit_identical() {
        let forest = two_tree_forest();
        let features = [45.0, 31.0];

        let first = forest.predict_proba(&features);
        for _ in 0..100 {
            assert_eq!(forest.predict_proba(&features).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn test_validate_rejects_importance_mismatch() {
        let mut forest = two_tree_forest();
        forest.feature_importances.pop();
        assert!(forest.validate().is_err());
    }

    #[test]
    fn test_serde_roundtrip() {
        let forest = two_tree_forest();
        let json = serde_json::to_string(&forest).unwrap();
        let restored: Forest = serde_json::from_str(&json).unwrap();
        assert_eq!(forest, restored);
        assert_eq!(
            forest.predict_proba(&[30.0, 20.0]),
            restored.predict_proba(&[30.0, 20.0])
        );
    }
}
