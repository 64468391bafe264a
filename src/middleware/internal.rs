//! Shared-secret gate for service-to-service endpoints.
//!
//! Requests whose path is under the internal prefix must carry
//! `X-Internal-Secret` equal to the configured secret. Anything else is denied
//! with a plain 403 before the rest of the chain runs; downstream processing
//! is never invoked for a denied request.
//!
//! This is one layer of protection for internal endpoints; network-level
//! isolation (private VPC, security groups) still applies. Marking the
//! request as internal is not done here but during context extraction, which
//! keys off the same path prefix.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::SecurityConfig;

/// Header internal callers present the shared secret in.
pub const HEADER_INTERNAL_SECRET: &str = "x-internal-secret";

pub async fn guard(
    State(config): State<SecurityConfig>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if req.uri().path().starts_with(&config.internal_prefix) {
        let presented = req
            .headers()
            .get(HEADER_INTERNAL_SECRET)
            .and_then(|v| v.to_str().ok());
        if presented != Some(config.internal_secret.as_str()) {
            tracing::warn!(
                path = %req.uri().path(),
                "internal secret missing or mismatched"
            );
            return (StatusCode::FORBIDDEN, "Forbidden").into_response();
        }
    }
    next.run(req).await
}
