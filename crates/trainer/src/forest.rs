//! Random-forest training with reproducible parallel construction
//!
//! Trees are fitted in parallel, but each tree's RNG is seeded from the
//! forest seed and the tree index, so thread scheduling cannot change the
//! resulting model.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use cardiolens_model::forest::{Forest, ForestMetadata};
use cardiolens_model::tree::Tree;

use crate::cart::{CartBuilder, TreeConfig};
use crate::dataset::Dataset;
use crate::deterministic::{stratified_split, LcgRng};
use crate::errors::TrainError;
use crate::metrics;

/// Seed stride between trees; any odd prime keeps the streams apart
const TREE_SEED_STRIDE: i64 = 7919;

/// Per-split feature subsampling strategy
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureSubsample {
    /// floor(sqrt(n_features)) candidates per split
    Sqrt,
    /// Every feature is a candidate at every split
    All,
}

/// Forest training configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ForestConfig {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_leaf: usize,
    pub test_fraction: f64,
    pub seed: i64,
    pub feature_subsample: FeatureSubsample,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 150,
            max_depth: 12,
            min_samples_leaf: 10,
            test_fraction: 0.2,
            seed: 42,
            feature_subsample: FeatureSubsample::Sqrt,
        }
    }
}

impl ForestConfig {
    /// Population screening ensemble: 150 trees, depth 12, 10 per leaf
    pub fn screening() -> Self {
        Self::default()
    }

    /// Clinical diagnosis ensemble: 200 trees, depth 10, 5 per leaf
    pub fn clinical() -> Self {
        Self {
            n_trees: 200,
            max_depth: 10,
            min_samples_leaf: 5,
            ..Self::default()
        }
    }

    /// Replace the split/sampling seed
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }
}

/// Result of a training run
#[derive(Clone, Debug)]
pub struct TrainOutcome {
    pub forest: Forest,
    /// Accuracy on the held-out split, in [0, 1]
    pub accuracy: f64,
    pub train_size: usize,
    pub test_size: usize,
}

/// Random-forest trainer
pub struct ForestTrainer {
    config: ForestConfig,
}

impl ForestTrainer {
    pub fn new(config: ForestConfig) -> Self {
        Self { config }
    }

    /// Train a forest on the dataset: stratified holdout split, seeded
    /// bootstrap per tree, parallel construction, importance aggregation,
    /// and holdout accuracy evaluation.
    pub fn train(&self, dataset: &Dataset) -> Result<TrainOutcome, TrainError> {
        if dataset.is_empty() {
            return Err(TrainError::EmptyDataset);
        }

        let (train_idx, test_idx) =
            stratified_split(&dataset.labels, self.config.test_fraction, self.config.seed);

        if train_idx.is_empty() {
            return Err(TrainError::EmptySplit);
        }

        let n_features = dataset.schema.len();
        let subsample = match self.config.feature_subsample {
            FeatureSubsample::Sqrt => Some(((n_features as f64).sqrt() as usize).max(1)),
            FeatureSubsample::All => None,
        };

        info!(
            trees = self.config.n_trees,
            max_depth = self.config.max_depth,
            min_samples_leaf = self.config.min_samples_leaf,
            train = train_idx.len(),
            test = test_idx.len(),
            "training forest"
        );

        let built: Vec<(Tree, Vec<f64>)> = (0..self.config.n_trees)
            .into_par_iter()
            .map(|tree_idx| self.build_tree(dataset, &train_idx, subsample, tree_idx))
            .collect();

        let mut trees = Vec::with_capacity(built.len());
        let mut importances = vec![0.0; n_features];

        for (tree, raw_importance) in built {
            // Normalize each tree's contribution before averaging
            let total: f64 = raw_importance.iter().sum();
            if total > 0.0 {
                for (slot, value) in importances.iter_mut().zip(&raw_importance) {
                    *slot += value / total;
                }
            }
            trees.push(tree);
        }

        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            for value in &mut importances {
                *value /= total;
            }
        } else {
            // No split anywhere in the forest; fall back to uniform mass
            let uniform = 1.0 / n_features as f64;
            importances.fill(uniform);
        }

        let mut forest = Forest {
            schema: dataset.schema.clone(),
            trees,
            feature_importances: importances,
            metadata: ForestMetadata {
                version: cardiolens_model::VERSION.to_string(),
                trained_at: chrono::Utc::now().timestamp(),
                tree_count: self.config.n_trees,
                max_depth: self.config.max_depth,
                feature_count: n_features,
                holdout_accuracy: 0.0,
            },
        };

        let accuracy = self.evaluate(&forest, dataset, &test_idx);
        forest.metadata.holdout_accuracy = accuracy;

        info!(accuracy, "training complete");

        Ok(TrainOutcome {
            forest,
            accuracy,
            train_size: train_idx.len(),
            test_size: test_idx.len(),
        })
    }

    fn build_tree(
        &self,
        dataset: &Dataset,
        train_idx: &[usize],
        subsample: Option<usize>,
        tree_idx: usize,
    ) -> (Tree, Vec<f64>) {
        debug!(tree = tree_idx, "building tree");

        let mut rng = LcgRng::new(
            self.config
                .seed
                .wrapping_add((tree_idx as i64 + 1).wrapping_mul(TREE_SEED_STRIDE)),
        );

        // Bootstrap: n draws with replacement from the training rows
        let n = train_idx.len();
        let sample: Vec<usize> = (0..n)
            .map(|_| train_idx[rng.next_range(n as i64) as usize])
            .collect();

        let tree_config = TreeConfig {
            max_depth: self.config.max_depth,
            min_samples_leaf: self.config.min_samples_leaf,
            feature_subsample: subsample,
        };

        CartBuilder::new(&dataset.features, &dataset.labels, tree_config).build(&sample, &mut rng)
    }

    fn evaluate(&self, forest: &Forest, dataset: &Dataset, test_idx: &[usize]) -> f64 {
        if test_idx.is_empty() {
            warn!("holdout split is empty; reporting zero accuracy");
            return 0.0;
        }

        let predicted: Vec<u8> = test_idx
            .iter()
            .map(|&i| u8::from(forest.predict_proba(&dataset.features[i]) >= 0.5))
            .collect();
        let actual: Vec<u8> = test_idx.iter().map(|&i| dataset.labels[i]).collect();

        metrics::accuracy(&predicted, &actual)
    }
}
