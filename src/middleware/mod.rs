/*
 * Responsibility
 * - Middleware wiring for the security layer (re-exports + apply())
 * - Ordering guarantee: the internal guard runs before context extraction,
 *   so a forged internal call is rejected before any context becomes
 *   visible to application code
 */
pub mod context;
pub mod internal;

use axum::{Router, middleware::from_fn_with_state};
use tower_http::trace::TraceLayer;

use crate::config::SecurityConfig;

/// Apply the security stack to a Router.
///
/// Outermost to innermost: request tracing, internal guard, context
/// extraction. With `Router::layer` a later layer wraps the earlier ones,
/// hence the reversed order below.
pub fn apply(router: Router, config: SecurityConfig) -> Router {
    router
        .layer(from_fn_with_state(config.clone(), context::extract))
        .layer(from_fn_with_state(config, internal::guard))
        .layer(TraceLayer::new_for_http())
}
