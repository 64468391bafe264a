//! Builds the per-request [`SecurityContext`] from trusted gateway headers
//! and binds it for the remainder of request processing.
//!
//! Trust model: header values are taken at face value. The gateway in front
//! of this service validates callers and strips client-supplied copies of the
//! identity headers. Paths under the internal prefix reach this stage only
//! after `internal::guard` has verified the shared secret.
//!
//! Unauthenticated requests are not rejected here; they flow through with an
//! unauthenticated context so public endpoints keep working, and the
//! enforcement guards decide at the protected operation.

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};

use crate::config::SecurityConfig;
use crate::context::{self, SecurityContext};
use crate::error::SecurityError;

pub async fn extract(
    State(config): State<SecurityConfig>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, SecurityError> {
    let ctx = match SecurityContext::from_request(
        &config.internal_prefix,
        req.uri().path(),
        req.headers(),
    ) {
        Ok(ctx) => ctx,
        Err(err) => {
            // A malformed required header means the gateway is misbehaving;
            // reject explicitly instead of downgrading to unauthenticated.
            tracing::warn!(
                error = %err,
                path = %req.uri().path(),
                "rejecting request with malformed security headers"
            );
            return Err(err);
        }
    };

    // Handlers receive the context through the SecurityCtx extractor; nested
    // call chains read it from the task-local binding.
    req.extensions_mut().insert(ctx.clone());

    Ok(context::with_context(ctx, next.run(req)).await)
}
