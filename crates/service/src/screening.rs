//! Population screening model: cardiovascular risk from basic biometrics

use std::path::Path;

use tracing::{debug, info};

use cardiolens_model::forest::Forest;
use cardiolens_model::schema::ScreeningInput;
use cardiolens_trainer::dataset::load_screening_dataset;
use cardiolens_trainer::forest::{ForestConfig, ForestTrainer};

use crate::errors::ServiceError;

/// Trained screening-tier model
///
/// Immutable after construction; a shared reference is safe across
/// concurrent inference calls.
#[derive(Clone, Debug)]
pub struct ScreeningModel {
    forest: Forest,
}

impl ScreeningModel {
    pub fn new(forest: Forest) -> Self {
        Self { forest }
    }

    /// The underlying fitted forest
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Probability of cardiovascular disease for the given profile, in
    /// [0, 1].
    ///
    /// BMI is recomputed from height and weight on every call; a
    /// caller-supplied BMI is never accepted, so the value stays
    /// consistent with height and weight even under simulation. Pure
    /// function: no side effects, no per-call caching.
    pub fn predict(&self, input: &ScreeningInput) -> f64 {
        self.forest.predict_proba(&input.feature_vector())
    }
}

/// Load, clean, and fit the screening tier. Returns the model and its
/// holdout accuracy.
pub fn train_screening<P: AsRef<Path>>(
    path: P,
    config: ForestConfig,
) -> Result<(ScreeningModel, f64), ServiceError> {
    let dataset = load_screening_dataset(path)?;
    info!(
        records = dataset.len(),
        prevalence = dataset.prevalence(),
        "screening dataset ready"
    );
    for (name, (min, max)) in dataset.schema.iter().zip(dataset.feature_stats()) {
        debug!("feature {}: min={:.2}, max={:.2}", name, min, max);
    }

    let outcome = ForestTrainer::new(config).train(&dataset)?;
    Ok((ScreeningModel::new(outcome.forest), outcome.accuracy))
}
