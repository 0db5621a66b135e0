//! API error taxonomy and its HTTP mapping.
//!
//! Client-caused input errors carry structured per-field detail. Internal
//! failures are collapsed into one opaque message so nothing about the
//! model or encoder leaks to callers; the cause goes to the logs instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::features::validate::FieldError;

/// Body of every 500 response.
pub const INTERNAL_PREDICTION_ERROR: &str = "Internal prediction error";

/// An error surfaced to the HTTP caller.
#[derive(Debug)]
pub enum ApiError {
    /// Schema validation failed; one descriptor per offending field.
    Validation(Vec<FieldError>),

    /// Anything that went wrong after validation.
    Internal,
}

#[derive(Serialize)]
struct ValidationBody {
    detail: Vec<FieldError>,
}

#[derive(Serialize)]
struct InternalBody {
    detail: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(detail) => {
                (StatusCode::BAD_REQUEST, Json(ValidationBody { detail })).into_response()
            }
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(InternalBody {
                    detail: INTERNAL_PREDICTION_ERROR,
                }),
            )
                .into_response(),
        }
    }
}
