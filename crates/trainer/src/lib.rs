//! Cardio-Lens training pipeline
//!
//! Loads and cleans the two tabular sources, then fits reproducible
//! random-forest classifiers: deterministic stratified splits, seeded
//! bootstrap sampling, and exact-greedy Gini trees with deterministic
//! tie-breaking, so the same inputs and seed always produce the same
//! model.
//!
//! Modules:
//! - `dataset`: delimited-table parsing and per-tier cleaning contracts
//! - `deterministic`: seeded RNG, shuffling, and stratified splitting
//! - `cart`: exact-greedy classification tree builder
//! - `forest`: forest-level training, importances, holdout evaluation
//! - `metrics`: accuracy and prevalence helpers
//! - `errors`: typed load and training errors

pub mod cart;
pub mod dataset;
pub mod deterministic;
pub mod errors;
pub mod forest;
pub mod metrics;

pub use dataset::{load_clinical_dataset, load_screening_dataset, Dataset};
pub use deterministic::{stratified_split, LcgRng};
pub use errors::{DataLoadError, TrainError};
pub use forest::{FeatureSubsample, ForestConfig, ForestTrainer, TrainOutcome};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
