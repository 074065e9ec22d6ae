//! Service configuration

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment prefix, e.g. `RUL__SERVER__BIND_ADDR=127.0.0.1:8000`
pub const ENV_PREFIX: &str = "RUL";

/// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "rul.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:9696".to_string(),
        }
    }
}

/// Runtime configuration of `rul-service`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    /// Fitted pipeline artifact loaded at startup
    pub model_path: PathBuf,
    /// Fallback filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Install the Prometheus recorder and expose `/metrics`
    pub metrics_enabled: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            model_path: PathBuf::from("Models/lr_rul_pipeline.bin"),
            log_level: "info".to_string(),
            metrics_enabled: true,
        }
    }
}

impl ServiceConfig {
    /// Defaults, then `file` (or `rul.toml` if it exists), then `RUL__*`
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?
            .try_deserialize()
    }
}
