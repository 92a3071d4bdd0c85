//! Unified API error type.
//!
//! Every handler returns `Result<T, ApiError>`, which implements
//! [`axum::response::IntoResponse`] so errors are automatically converted
//! to a JSON-body HTTP response with an appropriate status code.
//!
//! Internal errors (storage, task join) are logged with full detail but
//! only a generic message is returned to the caller, so SQL or file paths
//! never leak to clients.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// All errors that can occur in the request lifecycle.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or a value is malformed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Login failed or no matching account exists.
    #[error("invalid credentials")]
    Unauthorized,

    /// The caller referenced a resource that does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The resource already exists (duplicate friendship).
    #[error("already exists: {0}")]
    AlreadyExists(String),

    /// Propagated from the SQLite store or a blocking-task join.
    #[error("storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, client_message) = match &self {
            // Client-facing errors: expose the message directly.
            ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid credentials".to_owned()),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
            ApiError::AlreadyExists(m) => (StatusCode::BAD_REQUEST, m.clone()),

            // Internal errors: log the full detail, return a generic message.
            ApiError::Storage(e) => {
                error!(error = ?e, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, Json(json!({ "error": client_message }))).into_response()
    }
}

impl ApiError {
    /// Missing required request field.
    pub fn missing_field(name: &str) -> Self {
        ApiError::Validation(format!("missing field `{}`", name))
    }
}
