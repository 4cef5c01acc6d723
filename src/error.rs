//! Error types for madang-rating

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
///
/// JSON variants respond with a flat `{"error": "..."}` body carrying the
/// exact reason string of the API contract. Upload decode failures respond
/// with plain text instead, matching the import page's error surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Upload with an unrecognized text encoding (400, plain text)
    #[error("Unsupported upload: {0}")]
    BadUpload(String),

    /// Database operation error (500)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Generic error (500)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadUpload(msg) => {
                // Plain-text body, not the JSON error envelope
                return (StatusCode::BAD_REQUEST, msg).into_response();
            }
            ApiError::Database(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::Other(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
