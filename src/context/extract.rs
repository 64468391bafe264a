use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::SecurityError;

use super::SecurityContext;

/// Extractor handing the request's [`SecurityContext`] to a handler.
///
/// The extraction middleware inserts the context into request extensions; a
/// missing value means the middleware is not wired in front of this route,
/// which surfaces as [`SecurityError::ContextMissing`] (500), not as a caller
/// error.
pub struct SecurityCtx(pub SecurityContext);

impl<S> FromRequestParts<S> for SecurityCtx
where
    S: Send + Sync,
{
    type Rejection = SecurityError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SecurityContext>()
            .cloned()
            .map(SecurityCtx)
            .ok_or(SecurityError::ContextMissing)
    }
}
