//! Feature Preparation Errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading or shaping cycle data
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Input file could not be opened or read
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Row has the wrong number of columns
    #[error("Line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Column value could not be parsed
    #[error("Line {line}: invalid value {value:?} for column {column}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },

    /// Rows and values disagree on width
    #[error("Invalid input shape: expected {expected} columns, got {actual}")]
    InvalidShape { expected: usize, actual: usize },
}
