//! RUL Prediction Service - Main Entry Point

use anyhow::{Context, Result};
use api::{init_logging, run_server, ServiceConfig};
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Optional config file as the only argument; everything else via RUL__*
    let file = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ServiceConfig::load(file.as_deref()).context("loading service config")?;

    init_logging(&config.log_level);

    info!("=== RUL Prediction Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Model: {}", config.model_path.display());

    run_server(config).await
}
