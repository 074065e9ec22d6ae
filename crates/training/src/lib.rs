//! Offline Training Pipeline
//!
//! Loads CMAPSS run-to-failure data, labels every cycle with its remaining
//! useful life, fits the scaling + regression pipeline and reports RMSE/R²
//! on train, test and validation subsets.

pub mod config;
pub mod data;
pub mod metrics;
pub mod predict;
pub mod split;
pub mod trainer;

pub use config::TrainingConfig;
pub use data::CmapssData;
pub use metrics::Metrics;
pub use predict::{predict_units, UnitPrediction};
pub use trainer::{fit_and_evaluate, run, EvaluationReport, TrainingOutcome};

use feature_engine::FeatureError;
use inference_engine::InferenceError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a training run
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Training data error: {0}")]
    Data(#[from] FeatureError),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} line {line}: invalid RUL label {value:?}")]
    InvalidLabel {
        path: PathBuf,
        line: usize,
        value: String,
    },
    #[error("Validation set has {units} units but {labels} RUL labels")]
    LabelCountMismatch { units: usize, labels: usize },
    #[error("No rows in {0}")]
    EmptyDataset(PathBuf),
    #[error("test_size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),
    #[error("Splitting {rows} rows with test_size {test_size} leaves an empty subset")]
    EmptySplit { rows: usize, test_size: f64 },
    #[error(transparent)]
    Model(#[from] InferenceError),
}
