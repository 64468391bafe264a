/*
 * Responsibility
 * - Error taxonomy for the security layer
 * - IntoResponse mapping (HTTP status / JSON error body)
 * - Keeps authentication failures (401), authorization failures (403),
 *   gateway misconfiguration (400) and wiring defects (500) distinct
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SecurityError {
    /// No authenticated caller; retry with credentials.
    #[error("unauthorized")]
    Unauthorized,
    /// Caller is known but lacks the required authority or internal status.
    #[error("forbidden")]
    Forbidden,
    /// A required identity header is missing or unparseable. This means the
    /// gateway is misbehaving; it must never be downgraded to "unauthenticated".
    #[error("missing or malformed header: {header}")]
    MalformedHeader { header: &'static str },
    /// The current context was requested outside any bound request extent.
    /// A wiring defect in the service, not a caller fault.
    #[error("no security context bound to this request")]
    ContextMissing,
}

impl IntoResponse for SecurityError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            SecurityError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                "unauthorized".to_string(),
            ),
            SecurityError::Forbidden => {
                (StatusCode::FORBIDDEN, "forbidden", "forbidden".to_string())
            }
            SecurityError::MalformedHeader { header } => (
                StatusCode::BAD_REQUEST,
                "malformed_header",
                format!("missing or malformed header: {header}"),
            ),
            SecurityError::ContextMissing => {
                // Extraction middleware is not wired in front of this route.
                tracing::error!("security context requested outside a bound request extent");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}
