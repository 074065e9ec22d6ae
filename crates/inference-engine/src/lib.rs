//! RUL Inference Engine
//!
//! A fitted min-max scaler and least-squares regressor, persisted as one
//! artifact and wrapped by a prediction service that is loaded once at
//! startup.

mod pipeline;
mod regression;
mod scaler;
mod service;

pub use pipeline::{FittedPipeline, FORMAT_VERSION, MAGIC};
pub use regression::LinearRegression;
pub use scaler::MinMaxScaler;
pub use service::{round_rul, PredictionService};

use std::path::PathBuf;
use thiserror::Error;

/// Errors while loading a persisted pipeline
#[derive(Debug, Error)]
pub enum ModelLoadError {
    #[error("Model not found at: {0}")]
    NotFound(PathBuf),
    #[error("Model at {path} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },
    #[error("Model at {path} has format version {found}, supported version is {supported}")]
    IncompatibleVersion {
        path: PathBuf,
        found: u16,
        supported: u16,
    },
    #[error("Model expects features {actual:?}, service supplies {expected:?}")]
    IncompatibleFeatures {
        expected: Vec<String>,
        actual: Vec<String>,
    },
    #[error("Failed to read model at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors during fitting, persistence or inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error(transparent)]
    ModelLoad(#[from] ModelLoadError),
    #[error("Invalid input shape: expected {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },
    #[error("Feature mismatch at column {index}: expected {expected}, got {actual}")]
    SchemaMismatch {
        index: usize,
        expected: String,
        actual: String,
    },
    #[error("Expected a single feature row, got {0}")]
    NotSingleRow(usize),
    #[error("Prediction is not finite: {0}")]
    NonFinite(f64),
    #[error("Model fit failed: {0}")]
    FitFailed(String),
    #[error("Failed to persist model to {path}: {reason}")]
    Persist { path: PathBuf, reason: String },
}
