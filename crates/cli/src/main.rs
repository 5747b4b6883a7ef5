//! Cardio-Lens trainer CLI
//!
//! Trains both risk tiers from their tabular sources and reports holdout
//! accuracy and the clinical model's global feature importances.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use cardiolens_model::forest::ForestMetadata;
use cardiolens_service::{DataConfig, ModelRegistry};

#[derive(Parser, Debug)]
#[command(name = "cardiolens")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Two-tier cardiovascular risk model trainer", long_about = None)]
struct Args {
    /// Population screening table (semicolon-delimited)
    #[arg(long, default_value = "dataset/cardio_base.csv")]
    screening_data: PathBuf,

    /// Clinical table (comma-delimited, one-hot columns pre-expanded)
    #[arg(long, default_value = "dataset/heart_processed.csv")]
    clinical_data: PathBuf,

    /// Random seed for reproducible splits and bootstrap sampling
    #[arg(long, default_value = "42")]
    seed: i64,

    /// Write a JSON training report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Serialize)]
struct TierReport {
    accuracy: f64,
    trees: usize,
    max_depth: usize,
    features: usize,
    trained_at: i64,
}

impl TierReport {
    fn new(metadata: &ForestMetadata, accuracy: f64) -> Self {
        Self {
            accuracy,
            trees: metadata.tree_count,
            max_depth: metadata.max_depth,
            features: metadata.feature_count,
            trained_at: metadata.trained_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct TrainingReport {
    screening: TierReport,
    clinical: TierReport,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("Cardio-Lens trainer v{}", env!("CARGO_PKG_VERSION"));

    let config = DataConfig {
        screening_path: args.screening_data,
        clinical_path: args.clinical_data,
        seed: args.seed,
    };

    info!("Screening table: {}", config.screening_path.display());
    info!("Clinical table:  {}", config.clinical_path.display());
    info!("Seed: {}", config.seed);

    let registry = ModelRegistry::new(config);

    let started = Instant::now();
    let (screening_model, screening_accuracy) = registry
        .screening()
        .context("Failed to train the screening model")?;
    info!(
        "Screening model ready: accuracy {:.2}% ({:.1?})",
        screening_accuracy * 100.0,
        started.elapsed()
    );

    let started = Instant::now();
    let (clinical_model, clinical_accuracy) = registry
        .clinical()
        .context("Failed to train the clinical model")?;
    info!(
        "Clinical model ready: accuracy {:.2}% ({:.1?})",
        clinical_accuracy * 100.0,
        started.elapsed()
    );

    info!("Top clinical risk factors:");
    for (label, score) in clinical_model.importances().top(5) {
        info!("  {}: {:.4}", label, score);
    }

    if let Some(path) = args.report {
        let report = TrainingReport {
            screening: TierReport::new(&screening_model.forest().metadata, *screening_accuracy),
            clinical: TierReport::new(&clinical_model.forest().metadata, *clinical_accuracy),
        };

        let json =
            serde_json::to_string_pretty(&report).context("Failed to serialize the report")?;
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("Training report written to {}", path.display());
    }

    Ok(())
}
