//! Data-source configuration

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Locations of the two training tables and the split/sampling seed
///
/// The tables are read once at startup; the system performs no writes and
/// no schema migrations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// Population screening table (semicolon-delimited)
    pub screening_path: PathBuf,
    /// Clinical table (comma-delimited, one-hot columns pre-expanded)
    pub clinical_path: PathBuf,
    /// Seed for reproducible splits and bootstrap sampling
    pub seed: i64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            screening_path: PathBuf::from("dataset/cardio_base.csv"),
            clinical_path: PathBuf::from("dataset/heart_processed.csv"),
            seed: 42,
        }
    }
}
