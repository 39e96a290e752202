/// Error handling for the API server
///
/// A single error type that maps to HTTP responses. Handlers return
/// `ApiResult<T>`, and every failure converts to the wire shape the clients
/// expect: `{"error": "..."}` for single failures and `{"errors": [...]}`
/// for aggregated validation messages.
///
/// The taxonomy is deliberately narrow: malformed input, validation
/// failure, referential violation, and email conflict are all 400s; point
/// lookups on absent rows are 404s; anything unexpected from storage is a
/// 500 whose details are logged server-side and never leaked to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed input, referential violation, or other client error (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Aggregated field-validation failures (400)
    #[error("Validation failed: {} errors", .0.len())]
    Validation(Vec<String>),

    /// Duplicate unique field, i.e. email (400)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Entity absent for a point lookup (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected storage or internal failure (500)
    ///
    /// Carries only the fixed client-facing message; the underlying error
    /// was already logged where it happened.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Logs the underlying failure and produces an [`ApiError::Internal`]
    /// carrying only the fixed client-facing message
    pub fn internal(message: &str, err: impl std::fmt::Display) -> Self {
        tracing::error!(error = %err, "{message}");
        ApiError::Internal(message.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) | ApiError::Conflict(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors }))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
            }
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": msg })),
            )
                .into_response(),
        }
    }
}
