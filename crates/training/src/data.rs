//! CMAPSS Dataset Loading

use crate::config::TrainingConfig;
use crate::TrainingError;
use feature_engine::{read_cycle_rows, RawCycleRow};
use ndarray::Array1;
use std::path::Path;
use tracing::info;

/// The three tables of one CMAPSS sub-dataset
#[derive(Debug, Clone)]
pub struct CmapssData {
    /// Run-to-failure training trajectories
    pub train: Vec<RawCycleRow>,
    /// Truncated trajectories used for validation
    pub validation: Vec<RawCycleRow>,
    /// True RUL at the last validation cycle, one per unit in unit order
    pub validation_rul: Array1<f64>,
}

impl CmapssData {
    /// Load train, validation and label files named by `config`
    pub fn load(config: &TrainingConfig) -> Result<Self, TrainingError> {
        let train = read_cycle_rows(config.train_file())?;
        let validation = read_cycle_rows(config.validation_file())?;
        let validation_rul = read_rul_labels(&config.labels_file())?;

        if train.is_empty() {
            return Err(TrainingError::EmptyDataset(config.train_file()));
        }

        info!(
            "Loaded CMAPSS {}: {} train rows, {} validation rows, {} labels",
            config.dataset,
            train.len(),
            validation.len(),
            validation_rul.len()
        );

        Ok(Self {
            train,
            validation,
            validation_rul,
        })
    }
}

/// Parse a label file: one RUL value per non-empty line
pub fn parse_rul_labels(text: &str, path: &Path) -> Result<Array1<f64>, TrainingError> {
    text.lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            let raw = l.trim();
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .ok_or_else(|| TrainingError::InvalidLabel {
                    path: path.to_path_buf(),
                    line: i + 1,
                    value: raw.to_string(),
                })
        })
        .collect()
}

/// Read and parse a label file from disk
pub fn read_rul_labels(path: &Path) -> Result<Array1<f64>, TrainingError> {
    let text = std::fs::read_to_string(path).map_err(|source| TrainingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rul_labels(&text, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        let labels = parse_rul_labels("112 \n98\n\n69  \n", Path::new("RUL_FD001.txt")).unwrap();
        assert_eq!(labels.to_vec(), vec![112.0, 98.0, 69.0]);
    }

    #[test]
    fn test_invalid_label_names_line() {
        let err = parse_rul_labels("12\nabc\n", Path::new("RUL_FD001.txt")).unwrap_err();
        match err {
            TrainingError::InvalidLabel { line, value, .. } => {
                assert_eq!(line, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(parse_rul_labels("-3\n", Path::new("x")).is_err());
    }

    #[test]
    fn test_missing_files() {
        let config = TrainingConfig {
            data_dir: "/nonexistent/CMAPSSData".into(),
            ..Default::default()
        };
        let err = CmapssData::load(&config).unwrap_err();
        assert!(err.to_string().contains("train_FD001.txt"));
    }
}
