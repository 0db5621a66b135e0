//! Request boundary: router, application state, and route handlers.
//!
//! Implements the API surface:
//! - GET  /        — static welcome message
//! - GET  /health  — static liveness payload
//! - POST /predict — validate a feature record and classify it

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::Config;
use crate::features::validate::{self, FieldError};
use crate::model::service::PredictionService;
use crate::server::error::ApiError;

/// Application state shared across handlers.
///
/// The prediction service is immutable after startup, so handlers read it
/// through the `Arc` without any locking.
pub struct AppState {
    pub service: PredictionService,
    pub config: Arc<Config>,
}

/// Build the axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/predict", post(predict))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─── Request/Response Types ────────────────────────────────────────────────

/// Root endpoint response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Successful prediction response.
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub species: String,
}

// ─── Route Handlers ────────────────────────────────────────────────────────

async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello! Welcome to the Penguins Classification API.".to_string(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn predict(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let request_id = Uuid::new_v4().to_string();

    // A body that is not JSON at all gets the same structured 400 shape as
    // a schema violation.
    let Json(body) = body.map_err(|rejection| {
        debug!(request_id, reason = rejection.body_text(), "Unreadable request body");
        ApiError::Validation(vec![FieldError::body(rejection.body_text(), "json_invalid")])
    })?;

    let record = validate::parse_record(&body).map_err(|errors| {
        debug!(request_id, errors = errors.len(), "Validation failed");
        ApiError::Validation(errors)
    })?;

    info!(request_id, record = ?record, "Prediction requested");

    match state.service.predict(&record) {
        Ok(species) => {
            info!(request_id, species, "Prediction result");
            Ok(Json(PredictResponse { species }))
        }
        Err(e) => {
            // Full cause stays server-side; the caller sees an opaque 500.
            error!(request_id, error = %e, "Prediction failed");
            Err(ApiError::Internal)
        }
    }
}
