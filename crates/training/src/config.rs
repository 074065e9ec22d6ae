//! Training configuration

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix for overrides, e.g. `RUL_TRAIN__SEED=7`
pub const ENV_PREFIX: &str = "RUL_TRAIN";

/// Offline training run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    /// Directory holding the CMAPSS text files
    pub data_dir: PathBuf,
    /// Dataset suffix (`FD001`..`FD004`)
    pub dataset: String,
    /// Where the fitted pipeline is written
    pub output_path: PathBuf,
    /// Fraction of labeled rows held out for testing
    pub test_size: f64,
    /// Shuffle seed for the train/test split
    pub seed: u64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("CMAPSSData"),
            dataset: "FD001".to_string(),
            output_path: PathBuf::from("Models/lr_rul_pipeline.bin"),
            test_size: 0.3,
            seed: 42,
        }
    }
}

impl TrainingConfig {
    /// Defaults, then an optional TOML file, then `RUL_TRAIN__*` variables
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(File::from(path).required(true));
        }
        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }

    /// Path of the training table
    pub fn train_file(&self) -> PathBuf {
        self.data_dir.join(format!("train_{}.txt", self.dataset))
    }

    /// Path of the validation feature table
    pub fn validation_file(&self) -> PathBuf {
        self.data_dir.join(format!("test_{}.txt", self.dataset))
    }

    /// Path of the validation RUL labels
    pub fn labels_file(&self) -> PathBuf {
        self.data_dir.join(format!("RUL_{}.txt", self.dataset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.test_size, 0.3);
        assert_eq!(config.seed, 42);
        assert_eq!(config.train_file(), PathBuf::from("CMAPSSData/train_FD001.txt"));
        assert_eq!(config.validation_file(), PathBuf::from("CMAPSSData/test_FD001.txt"));
        assert_eq!(config.labels_file(), PathBuf::from("CMAPSSData/RUL_FD001.txt"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "dataset = \"FD003\"\ntest_size = 0.2").unwrap();

        let config = TrainingConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.dataset, "FD003");
        assert_eq!(config.test_size, 0.2);
        assert_eq!(config.output_path, PathBuf::from("Models/lr_rul_pipeline.bin"));
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("RUL_TRAIN__SEED", "7");
        std::env::set_var("RUL_TRAIN__DATA_DIR", "/data/cmapss");
        let config = TrainingConfig::load(None);
        std::env::remove_var("RUL_TRAIN__SEED");
        std::env::remove_var("RUL_TRAIN__DATA_DIR");

        let config = config.unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.data_dir, PathBuf::from("/data/cmapss"));
        assert_eq!(config.dataset, "FD001");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(TrainingConfig::load(Some(Path::new("/nonexistent/rul.toml"))).is_err());
    }
}
