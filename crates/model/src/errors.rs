//! Error types for model validation and feature assembly

use thiserror::Error;

/// Errors raised while validating a clinical feature mapping against the
/// training schema. Recoverable: the caller fixes the mapping and retries.
#[derive(Debug, Error)]
pub enum FeatureSchemaError {
    /// A required schema field was absent from the supplied mapping
    #[error("feature mapping is missing required field '{0}'")]
    MissingFeature(String),

    /// The mapping contained a field outside the training schema
    #[error("feature mapping contains unrecognized field '{0}'")]
    UnknownFeature(String),
}

/// Errors raised by structural model validation
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model validation failed: {0}")]
    ValidationFailed(String),
}
