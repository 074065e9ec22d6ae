//! RUL Prediction Route

use axum::{body::Bytes, extract::State, Json};
use sensor_schema::{ValidationError, ValidationErrors};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

use crate::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct RulResponse {
    pub predicted_rul: f64,
}

/// `POST /rul`: validate the body, then predict.
///
/// The body is parsed by hand so malformed JSON gets the same 422 shape as
/// a schema failure.
pub async fn predict_rul(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<RulResponse>, ApiError> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        ValidationErrors::from(ValidationError::InvalidFormat(format!("malformed JSON body: {}", e)))
    })?;
    let reading = state.validator.validate_value(&value)?;

    let start = Instant::now();
    let predicted_rul = state.service.predict(&reading)?;
    metrics::histogram!("rul_prediction_latency_seconds").record(start.elapsed().as_secs_f64());
    metrics::counter!("rul_predictions_total").increment(1);
    debug!("Predicted RUL {}", predicted_rul);

    Ok(Json(RulResponse { predicted_rul }))
}
