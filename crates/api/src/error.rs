//! HTTP error responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use inference_engine::InferenceError;
use sensor_schema::{ValidationError, ValidationErrors};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("prediction failed: {0}")]
    Prediction(#[from] InferenceError),
}

/// One entry of a 422 body
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ValidationBody {
    pub error: &'static str,
    pub details: Vec<FieldError>,
}

#[derive(Debug, Serialize)]
pub struct InternalBody {
    pub error: &'static str,
    pub message: &'static str,
}

impl From<&ValidationError> for FieldError {
    fn from(err: &ValidationError) -> Self {
        Self {
            field: err.field().map(str::to_string),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(errors) => {
                warn!("Rejected reading: {}", errors);
                metrics::counter!("rul_validation_failures_total").increment(1);
                let body = ValidationBody {
                    error: "validation_failed",
                    details: errors.errors().iter().map(FieldError::from).collect(),
                };
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
            ApiError::Prediction(err) => {
                error!("Prediction failed: {}", err);
                metrics::counter!("rul_prediction_errors_total").increment(1);
                let body = InternalBody {
                    error: "internal_error",
                    message: "prediction failed",
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
