//! Task-local binding of the current request's context.
//!
//! One bind per request: the extraction middleware wraps the remainder of
//! request processing in [`with_context`], and everything transitively awaited
//! inside observes the same context through [`current`]. When the wrapped
//! future completes (normally or by error) the binding is gone. Concurrent
//! requests each hold their own slot; no locking is involved.

use std::future::Future;

use crate::error::SecurityError;

use super::SecurityContext;

tokio::task_local! {
    static CURRENT: SecurityContext;
}

/// Run `fut` with `ctx` bound as the current security context.
///
/// Nested re-binding within one extent is not a supported operation; the
/// extraction middleware is the single writer.
pub async fn with_context<F>(ctx: SecurityContext, fut: F) -> F::Output
where
    F: Future,
{
    CURRENT.scope(ctx, fut).await
}

/// The context bound to the current task extent.
///
/// Fails with [`SecurityError::ContextMissing`] outside any bound extent.
/// There is deliberately no default: a fallback that looked unauthenticated
/// (let alone internal) would mask a wiring defect.
pub fn current() -> Result<SecurityContext, SecurityError> {
    CURRENT
        .try_with(SecurityContext::clone)
        .map_err(|_| SecurityError::ContextMissing)
}
