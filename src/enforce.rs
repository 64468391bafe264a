//! Enforcement guards called at protected operation boundaries.
//!
//! Each guard reads the current context from the propagation channel and
//! either returns it (the operation may proceed) or fails with the error the
//! HTTP layer maps to 401/403. Guards are pure: on success the only effect is
//! allowing the caller to continue; on failure the protected operation never
//! runs.
//!
//! ```ignore
//! async fn list_orders() -> Result<Json<Vec<Order>>, SecurityError> {
//!     let ctx = enforce::require_authority("order", "read", Scope::Tenant)?;
//!     // ...
//! }
//! ```

use crate::context::{self, SecurityContext};
use crate::error::SecurityError;
use crate::scope::{Scope, permission_key};

/// The caller must be authenticated.
pub fn require_authenticated() -> Result<SecurityContext, SecurityError> {
    let ctx = context::current()?;
    if !ctx.is_authenticated() {
        return Err(SecurityError::Unauthorized);
    }
    Ok(ctx)
}

/// The caller must be authenticated and hold the permission
/// `action.resource` at exactly `required` scope.
///
/// The authentication check runs first, so an unauthenticated caller gets
/// `Unauthorized`, not `Forbidden`, regardless of authorities content.
///
/// Exact equality, not at-least: a caller granted `All` is rejected by a
/// check requiring `Own`. This mirrors the upstream gateway contract;
/// broadening it is a product decision, not an implementation detail.
pub fn require_authority(
    resource: &str,
    action: &str,
    required: Scope,
) -> Result<SecurityContext, SecurityError> {
    let ctx = require_authenticated()?;
    let key = permission_key(action, resource);
    match ctx.authority(&key) {
        Some(found) if found == required => Ok(ctx),
        _ => Err(SecurityError::Forbidden),
    }
}

/// The request must be an internal service-to-service call, i.e. addressed
/// to the internal prefix and already past the shared-secret guard.
pub fn require_internal() -> Result<SecurityContext, SecurityError> {
    let ctx = context::current()?;
    if !ctx.is_internal() {
        return Err(SecurityError::Forbidden);
    }
    Ok(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::with_context;
    use axum::http::{HeaderMap, HeaderValue};

    fn ctx_from(entries: &[(&'static str, &str)], path: &str) -> SecurityContext {
        let mut headers = HeaderMap::new();
        for (name, value) in entries {
            headers.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        SecurityContext::from_request("/internal/", path, &headers).unwrap()
    }

    fn authenticated_ctx(authorities: &str) -> SecurityContext {
        ctx_from(
            &[
                ("x-authenticated", "true"),
                ("x-userid", "42"),
                ("x-tenantid", "7"),
                ("x-authorities", authorities),
            ],
            "/orders",
        )
    }

    fn unauthenticated_ctx() -> SecurityContext {
        ctx_from(&[("x-authenticated", "false")], "/orders")
    }

    fn internal_ctx() -> SecurityContext {
        ctx_from(&[], "/internal/sync")
    }

    #[tokio::test]
    async fn require_authenticated_allows_authenticated_callers() {
        let ctx = with_context(authenticated_ctx("read.order.own"), async {
            require_authenticated()
        })
        .await
        .unwrap();
        assert_eq!(ctx.user_id(), Some(42));
    }

    #[tokio::test]
    async fn require_authenticated_rejects_unauthenticated_callers() {
        let err = with_context(unauthenticated_ctx(), async { require_authenticated() })
            .await
            .unwrap_err();
        assert_eq!(err, SecurityError::Unauthorized);
    }

    #[tokio::test]
    async fn require_authority_matches_on_exact_scope() {
        let result = with_context(authenticated_ctx("read.order.own,write.order.tenant"), async {
            require_authority("order", "read", Scope::Own)
        })
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn require_authority_rejects_scope_mismatch_in_both_directions() {
        // Granted OWN, required TENANT.
        let err = with_context(authenticated_ctx("read.order.own"), async {
            require_authority("order", "read", Scope::Tenant)
        })
        .await
        .unwrap_err();
        assert_eq!(err, SecurityError::Forbidden);

        // Granted ALL, required OWN: broader does not satisfy narrower.
        let err = with_context(authenticated_ctx("read.order.all"), async {
            require_authority("order", "read", Scope::Own)
        })
        .await
        .unwrap_err();
        assert_eq!(err, SecurityError::Forbidden);
    }

    #[tokio::test]
    async fn require_authority_rejects_absent_permission() {
        let err = with_context(authenticated_ctx("read.order.own"), async {
            require_authority("order", "delete", Scope::Own)
        })
        .await
        .unwrap_err();
        assert_eq!(err, SecurityError::Forbidden);
    }

    #[tokio::test]
    async fn require_authority_is_unauthorized_before_forbidden() {
        let err = with_context(unauthenticated_ctx(), async {
            require_authority("order", "read", Scope::Own)
        })
        .await
        .unwrap_err();
        assert_eq!(err, SecurityError::Unauthorized);
    }

    #[tokio::test]
    async fn bogus_scope_grant_evaluates_as_none_under_the_equality_rule() {
        // An unparseable scope token was stored as None; a check requiring
        // None matches it, any other requirement does not.
        let ok = with_context(authenticated_ctx("read.order.bogus"), async {
            require_authority("order", "read", Scope::None)
        })
        .await;
        assert!(ok.is_ok());

        let err = with_context(authenticated_ctx("read.order.bogus"), async {
            require_authority("order", "read", Scope::Own)
        })
        .await
        .unwrap_err();
        assert_eq!(err, SecurityError::Forbidden);
    }

    #[tokio::test]
    async fn require_internal_allows_only_internal_contexts() {
        let ok = with_context(internal_ctx(), async { require_internal() }).await;
        assert!(ok.is_ok());

        let err = with_context(authenticated_ctx("read.order.all"), async {
            require_internal()
        })
        .await
        .unwrap_err();
        assert_eq!(err, SecurityError::Forbidden);
    }

    #[test]
    fn guards_fail_with_context_missing_outside_an_extent() {
        assert_eq!(
            require_authenticated().unwrap_err(),
            SecurityError::ContextMissing
        );
        assert_eq!(
            require_authority("order", "read", Scope::Own).unwrap_err(),
            SecurityError::ContextMissing
        );
        assert_eq!(require_internal().unwrap_err(), SecurityError::ContextMissing);
    }
}
