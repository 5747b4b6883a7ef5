//! Clinical diagnosis model: heart disease from clinical measurements

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use cardiolens_model::errors::FeatureSchemaError;
use cardiolens_model::forest::Forest;
use cardiolens_model::importance::ImportanceRanking;
use cardiolens_model::schema::{clinical_label, CLINICAL_FEATURES};
use cardiolens_trainer::dataset::load_clinical_dataset;
use cardiolens_trainer::forest::{ForestConfig, ForestTrainer};

use crate::errors::ServiceError;

/// Probability plus the model-level importance ranking
///
/// The ranking is global: it is computed once at training time and is
/// identical for every prediction from the same trained model. It
/// explains the model, not the individual prediction — a documented
/// limitation preserved deliberately.
#[derive(Clone, Debug)]
pub struct ClinicalPrediction {
    pub probability: f64,
    pub importances: ImportanceRanking,
}

/// Trained clinical-tier model
#[derive(Clone, Debug)]
pub struct ClinicalModel {
    forest: Forest,
    ranking: ImportanceRanking,
}

impl ClinicalModel {
    pub fn new(forest: Forest) -> Self {
        let ranking = ImportanceRanking::from_scores(
            &forest.schema,
            &forest.feature_importances,
            |name| clinical_label(name).to_string(),
        );
        Self { forest, ranking }
    }

    /// The underlying fitted forest
    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// The model-level importance ranking, ascending by score
    pub fn importances(&self) -> &ImportanceRanking {
        &self.ranking
    }

    /// Predict from a complete feature mapping covering all 15 schema
    /// fields.
    ///
    /// The caller is responsible for one-hot encoding the categorical
    /// groups exactly as during training; leaving every flag of a group
    /// at zero encodes that group's baseline level. The mapping is
    /// validated structurally: a missing or unrecognized field is a
    /// [`FeatureSchemaError`], which the caller can fix and retry.
    pub fn predict(
        &self,
        features: &BTreeMap<String, f64>,
    ) -> Result<ClinicalPrediction, FeatureSchemaError> {
        for key in features.keys() {
            if !CLINICAL_FEATURES.contains(&key.as_str()) {
                return Err(FeatureSchemaError::UnknownFeature(key.clone()));
            }
        }

        let mut vector = Vec::with_capacity(CLINICAL_FEATURES.len());
        for name in CLINICAL_FEATURES {
            match features.get(name) {
                Some(&value) => vector.push(value),
                None => return Err(FeatureSchemaError::MissingFeature(name.to_string())),
            }
        }

        Ok(ClinicalPrediction {
            probability: self.forest.predict_proba(&vector),
            importances: self.ranking.clone(),
        })
    }
}

/// Load, clean, and fit the clinical tier. Returns the model and its
/// holdout accuracy.
pub fn train_clinical<P: AsRef<Path>>(
    path: P,
    config: ForestConfig,
) -> Result<(ClinicalModel, f64), ServiceError> {
    let dataset = load_clinical_dataset(path)?;
    info!(
        records = dataset.len(),
        prevalence = dataset.prevalence(),
        "clinical dataset ready"
    );
    for (name, (min, max)) in dataset.schema.iter().zip(dataset.feature_stats()) {
        debug!("feature {}: min={:.2}, max={:.2}", name, min, max);
    }

    let outcome = ForestTrainer::new(config).train(&dataset)?;
    Ok((ClinicalModel::new(outcome.forest), outcome.accuracy))
}
