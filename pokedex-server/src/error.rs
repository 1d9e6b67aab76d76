//! API error type with IntoResponse.
//!
//! Errors are converted to JSON bodies with appropriate status codes.
//! Database failures are logged and returned as a generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use pokedex_core::PokedexError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request failed validation (400)
    Validation { message: String },

    /// Import range failed validation (400)
    InvalidRange { start: i64, end: i64 },

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Upstream catalog failure escaped aggregation (502)
    Upstream { message: String },

    /// Store error (500, logged)
    Database(PokedexError),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": message
                }),
            ),
            Self::InvalidRange { start, end } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "invalid_range",
                    "message": format!("invalid import range [{start}, {end}]: start must be >= 1 and end >= start")
                }),
            ),
            Self::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": format!("{} '{}' not found", resource, id)
                }),
            ),
            Self::Upstream { message } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": "upstream_error",
                    "message": message
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return a generic message
                tracing::error!("store error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<PokedexError> for ApiError {
    fn from(e: PokedexError) -> Self {
        match e {
            PokedexError::InvalidRange { start, end } => Self::InvalidRange { start, end },
            PokedexError::PermanentStatus { .. }
            | PokedexError::RetriesExhausted { .. }
            | PokedexError::Http { .. }
            | PokedexError::Decode { .. } => Self::Upstream {
                message: e.to_string(),
            },
            other => Self::Database(other),
        }
    }
}
