//! Once-per-process holder for both trained tiers
//!
//! Training is the only expensive operation in the system, so each tier
//! is fitted at most once per process and treated as read-only
//! afterwards. The registry is an explicit dependency: construct it at
//! startup and pass a reference to every call site. There is no ambient
//! global lookup.

use once_cell::sync::OnceCell;

use cardiolens_trainer::forest::ForestConfig;

use crate::clinical::{train_clinical, ClinicalModel};
use crate::config::DataConfig;
use crate::errors::ServiceError;
use crate::screening::{train_screening, ScreeningModel};

/// Lazily-trained model pair with their holdout accuracies
pub struct ModelRegistry {
    config: DataConfig,
    screening: OnceCell<(ScreeningModel, f64)>,
    clinical: OnceCell<(ClinicalModel, f64)>,
}

impl ModelRegistry {
    pub fn new(config: DataConfig) -> Self {
        Self {
            config,
            screening: OnceCell::new(),
            clinical: OnceCell::new(),
        }
    }

    /// The screening model, training it on first access.
    ///
    /// Idempotent given the same dataset: later calls return the cached
    /// model and accuracy untouched.
    pub fn screening(&self) -> Result<&(ScreeningModel, f64), ServiceError> {
        self.screening.get_or_try_init(|| {
            train_screening(
                &self.config.screening_path,
                ForestConfig::screening().with_seed(self.config.seed),
            )
        })
    }

    /// The clinical model, training it on first access.
    pub fn clinical(&self) -> Result<&(ClinicalModel, f64), ServiceError> {
        self.clinical.get_or_try_init(|| {
            train_clinical(
                &self.config.clinical_path,
                ForestConfig::clinical().with_seed(self.config.seed),
            )
        })
    }

    /// Data-source configuration this registry trains from
    pub fn config(&self) -> &DataConfig {
        &self.config
    }
}
