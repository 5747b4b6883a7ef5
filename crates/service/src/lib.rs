//! Prediction services over the trained Cardio-Lens forests
//!
//! Wraps each trained forest in a stateless prediction entry point and
//! owns the once-per-process training of both tiers behind an explicit
//! registry handle. The registry replaces ambient global model state:
//! construct one at startup and pass it by reference to every call site.
//!
//! Modules:
//! - `screening`: population screening model (12 biometric features)
//! - `clinical`: clinical diagnosis model (15 features, one-hot groups)
//! - `registry`: once-per-process holder for both trained tiers
//! - `config`: data-source locations and training seed
//! - `errors`: service-level error aggregation

pub mod clinical;
pub mod config;
pub mod errors;
pub mod registry;
pub mod screening;

pub use clinical::{train_clinical, ClinicalModel, ClinicalPrediction};
pub use config::DataConfig;
pub use errors::ServiceError;
pub use registry::ModelRegistry;
pub use screening::{train_screening, ScreeningModel};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
