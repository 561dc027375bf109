//! API error types with structured JSON responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::inference::ModelError;
use crate::store::StoreError;
use crate::validate::Violations;

/// `{"detail": ...}` envelope used by every error except prediction
/// failures. The payload is a string for 404/400/500 and the violation
/// array for 422.
#[derive(Debug, Serialize)]
struct Detail<T: Serialize> {
    detail: T,
}

/// `{"error": ...}` envelope reserved for `/predict` failures.
#[derive(Debug, Serialize)]
struct PredictFailure {
    error: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// One or more request fields failed validation.
    #[error("validation failed: {0}")]
    Validation(#[from] Violations),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// The prediction call itself failed (model missing or broken).
    #[error("prediction failed: {0}")]
    Inference(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(violations) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(Detail { detail: violations }),
            )
                .into_response(),
            ApiError::NotFound(message) => {
                (StatusCode::NOT_FOUND, Json(Detail { detail: message })).into_response()
            }
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(Detail { detail: message })).into_response()
            }
            ApiError::Inference(message) => {
                tracing::error!(%message, "prediction failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(PredictFailure { error: message }),
                )
                    .into_response()
            }
            ApiError::Internal(detail) => {
                tracing::error!(%detail, "API internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(Detail {
                        detail: "Internal server error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<ModelError> for ApiError {
    fn from(err: ModelError) -> Self {
        ApiError::Inference(err.to_string())
    }
}
