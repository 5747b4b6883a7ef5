//! Error types for dataset loading and training

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading and cleaning a data source.
/// Fatal at startup: model construction aborts on any of these.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read data source {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("data source {0} has no header row")]
    MissingHeader(PathBuf),

    #[error("data source is missing required column '{0}'")]
    MissingColumn(String),

    #[error("no usable rows remain after cleaning {0}")]
    Empty(PathBuf),
}

/// Errors raised by the forest trainer.
#[derive(Debug, Error)]
pub enum TrainError {
    #[error("training dataset is empty")]
    EmptyDataset,

    #[error("stratified split left no training rows")]
    EmptySplit,
}
