//! Core model layer for Cardio-Lens risk prediction.
//!
//! Provides the decision-forest representation shared by the screening and
//! clinical tiers, the fixed feature schemas both models are trained
//! against, and the strongly-typed inputs that encode raw form values into
//! schema-ordered feature vectors.
//!
//! Modules:
//! - `tree`: index-addressed decision tree nodes and traversal
//! - `forest`: forest container and probability inference
//! - `schema`: fixed feature schemas and typed inputs for both tiers
//! - `importance`: label-mapped global feature-importance ranking
//! - `errors`: typed model and feature-schema errors

pub mod errors;
pub mod forest;
pub mod importance;
pub mod schema;
pub mod tree;

pub use errors::{FeatureSchemaError, ModelError};
pub use forest::{Forest, ForestMetadata};
pub use importance::ImportanceRanking;
pub use schema::{
    clinical_label, ChestPainType, ClinicalInput, Gender, Level3, RestingEcg, ScreeningInput,
    Sex, StSlope, CLINICAL_FEATURES, SCREENING_FEATURES,
};
pub use tree::{Node, Tree};

/// Crate version string for model metadata and reports
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
