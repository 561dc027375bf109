//! Root, about and health endpoints.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;
use crate::config;

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub model_version: String,
    pub model_loaded: bool,
}

/// `GET /` — welcome message.
pub async fn home() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Welcome to the Insurance Premium Prediction API!",
    })
}

/// `GET /about` — short description of the records service.
pub async fn about() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "A fully functional Patient Management System API.",
    })
}

/// `GET /health` — liveness plus model status.
///
/// Reports the loaded model's own version, or the fallback constant when
/// no artifact could be loaded at startup.
pub async fn health(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let model_version = match &ctx.classifier {
        Some(classifier) => classifier.version().to_string(),
        None => config::FALLBACK_MODEL_VERSION.to_string(),
    };

    Json(HealthResponse {
        status: "healthy",
        message: "The API is running smoothly.",
        model_version,
        model_loaded: ctx.classifier.is_some(),
    })
}
