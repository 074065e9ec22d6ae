//! RUL Prediction API Server
//!
//! Serves `POST /rul` on top of a pipeline loaded once at startup, plus
//! health and Prometheus metrics endpoints.

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use inference_engine::PredictionService;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sensor_schema::SensorValidator;
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
mod routes;

pub use config::{ServerConfig, ServiceConfig};
pub use error::ApiError;
pub use routes::health::HealthResponse;
pub use routes::rul::RulResponse;

/// Application state shared across handlers.
///
/// Built once before the listener is bound and never mutated afterwards.
pub struct AppState {
    /// Loaded prediction pipeline
    pub service: PredictionService,
    /// Request admission check
    pub validator: SensorValidator,
    /// Prometheus render handle, when metrics are enabled
    pub metrics: Option<PrometheusHandle>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: Instant,
}

impl AppState {
    pub fn new(service: PredictionService) -> Self {
        Self {
            service,
            validator: SensorValidator::default(),
            metrics: None,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/rul", post(routes::rul::predict_rul))
        .route("/api/v1/health", get(routes::health::health_handler))
        .route("/metrics", get(routes::prometheus::metrics_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize logging; `RUST_LOG` takes precedence over `level`
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

fn install_metrics() -> Result<PrometheusHandle> {
    metrics::describe_counter!("rul_predictions_total", "Successful RUL predictions");
    metrics::describe_counter!("rul_validation_failures_total", "Requests rejected by validation");
    metrics::describe_counter!("rul_prediction_errors_total", "Predictions that failed after validation");
    metrics::describe_histogram!("rul_prediction_latency_seconds", "Model inference latency");

    PrometheusBuilder::new()
        .install_recorder()
        .context("installing Prometheus recorder")
}

/// Load the model and assemble state. Fails if the artifact is unusable.
pub fn build_state(config: &ServiceConfig) -> Result<AppState> {
    let service = PredictionService::load(&config.model_path)
        .with_context(|| format!("loading model {}", config.model_path.display()))?;
    let mut state = AppState::new(service);
    if config.metrics_enabled {
        state = state.with_metrics(install_metrics()?);
    }
    Ok(state)
}

/// Run the server. The model is loaded before the listener is bound.
pub async fn run_server(config: ServiceConfig) -> Result<()> {
    let state = Arc::new(build_state(&config)?);
    let app = create_router(state);

    let addr = &config.server.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Starting API server on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
