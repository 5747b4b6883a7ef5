//! Service-level error aggregation

use thiserror::Error;

use cardiolens_trainer::errors::{DataLoadError, TrainError};

/// Errors surfaced while constructing a tier's model.
/// Fatal at startup; no retries are performed, since loading and training
/// are deterministic and a failure is never transient.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Data(#[from] DataLoadError),

    #[error(transparent)]
    Train(#[from] TrainError),
}
