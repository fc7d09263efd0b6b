//! API error type shared by every HTTP-facing crate
//!
//! Each service crate keeps its own error enum and converts it into
//! [`ApiError`] at the handler boundary. Rendering always produces a compact
//! JSON body of the form `{"error": "<message>"}` and logs the failure first.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API clients
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or invalid request input, or a write the store refused
    #[error("{0}")]
    Validation(String),

    /// Missing or invalid session
    #[error("Unauthorized")]
    Unauthorized,

    /// Upstream dependency is temporarily unavailable; the client should retry
    #[error("{message}")]
    Unavailable { message: String, retry_after: u64 },

    /// Any other failure
    #[error("{0}")]
    Internal(String),
}

/// Result type for handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Create an unavailable error with a retry hint in seconds
    pub fn unavailable(msg: impl Into<String>, retry_after: u64) -> Self {
        Self::Unavailable {
            message: msg.into(),
            retry_after,
        }
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "Request rejected");
        }

        let body = match &self {
            Self::Unavailable {
                message,
                retry_after,
            } => json!({ "error": message, "retryAfter": retry_after }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
