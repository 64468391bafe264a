/*
 * Responsibility
 * - The immutable per-request security context (the contract handlers see)
 * - Extraction algorithm: trusted gateway headers -> SecurityContext
 *
 * Notes
 * - Header validation stops here; authorization decisions live in `enforce`
 * - The internal guard has already verified the shared secret before a path
 *   under the internal prefix reaches extraction
 */
use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;

use crate::error::SecurityError;
use crate::scope::{Scope, permission_key};

const HEADER_TRACE_ID: &str = "x-traceid";
const HEADER_AUTHENTICATED: &str = "x-authenticated";
const HEADER_DEVICE_ID: &str = "x-deviceid";
const HEADER_USER_ID: &str = "x-userid";
const HEADER_TENANT_ID: &str = "x-tenantid";
const HEADER_AUTHORITIES: &str = "x-authorities";

/// Immutable snapshot of one request's identity/authorization facts.
///
/// Built exactly once per request by the extraction middleware. `Clone` is
/// cheap: the authorities map sits behind an `Arc`, so fan-out within a
/// request shares one read-only map.
///
/// A context is either internal (authentication fields unset) or it went
/// through the authenticated/unauthenticated path; construction never yields
/// a partially populated authenticated context.
#[derive(Debug, Clone, Default)]
pub struct SecurityContext {
    internal: bool,
    authenticated: bool,
    trace_id: Option<String>,
    user_id: Option<i64>,
    tenant_id: Option<i64>,
    device_id: Option<String>,
    authorities: Arc<HashMap<String, Scope>>,
}

impl SecurityContext {
    /// Build a context from the trusted gateway headers.
    ///
    /// - Paths under `internal_prefix` are marked internal; nothing else is
    ///   read from them. The guard has validated the secret already.
    /// - `X-Authenticated` decides whether identity headers are consumed.
    ///   Unauthenticated requests still produce a context; rejection is
    ///   deferred to the enforcement guards at the protected operation.
    /// - Missing/unparseable required headers are a fatal
    ///   [`SecurityError::MalformedHeader`], never a silent downgrade to
    ///   unauthenticated.
    pub fn from_request(
        internal_prefix: &str,
        path: &str,
        headers: &HeaderMap,
    ) -> Result<Self, SecurityError> {
        let trace_id = optional(headers, HEADER_TRACE_ID);

        if path.starts_with(internal_prefix) {
            return Ok(Self {
                internal: true,
                trace_id,
                ..Self::default()
            });
        }

        let authenticated =
            required(headers, HEADER_AUTHENTICATED)?.eq_ignore_ascii_case("true");
        let device_id = optional(headers, HEADER_DEVICE_ID);

        if !authenticated {
            return Ok(Self {
                trace_id,
                device_id,
                ..Self::default()
            });
        }

        let user_id = required_i64(headers, HEADER_USER_ID)?;
        let tenant_id = required_i64(headers, HEADER_TENANT_ID)?;
        let authorities = parse_authorities(&required(headers, HEADER_AUTHORITIES)?)?;

        Ok(Self {
            internal: false,
            authenticated: true,
            trace_id,
            user_id: Some(user_id),
            tenant_id: Some(tenant_id),
            device_id,
            authorities: Arc::new(authorities),
        })
    }

    pub fn is_internal(&self) -> bool {
        self.internal
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    pub fn user_id(&self) -> Option<i64> {
        self.user_id
    }

    pub fn tenant_id(&self) -> Option<i64> {
        self.tenant_id
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    /// Granted scope for a canonical `action.resource` key, if any.
    pub fn authority(&self, key: &str) -> Option<Scope> {
        self.authorities.get(key).copied()
    }

    /// All granted authorities. Empty unless authenticated.
    pub fn authorities(&self) -> &HashMap<String, Scope> {
        &self.authorities
    }

    #[cfg(test)]
    pub(crate) fn internal_for_tests(trace_id: Option<&str>) -> Self {
        Self {
            internal: true,
            trace_id: trace_id.map(String::from),
            ..Self::default()
        }
    }
}

fn optional(headers: &HeaderMap, name: &'static str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

fn required(headers: &HeaderMap, name: &'static str) -> Result<String, SecurityError> {
    optional(headers, name).ok_or(SecurityError::MalformedHeader { header: name })
}

fn required_i64(headers: &HeaderMap, name: &'static str) -> Result<i64, SecurityError> {
    required(headers, name)?
        .parse()
        .map_err(|_| SecurityError::MalformedHeader { header: name })
}

/// Parse the `X-Authorities` header: comma-separated `action.resource.scope`
/// tokens. The key is `action.resource`; an unrecognized scope token stores
/// `Scope::None` (no access) rather than failing, while a token without
/// exactly three dot-separated parts is malformed. The last occurrence of a
/// duplicate key wins.
fn parse_authorities(raw: &str) -> Result<HashMap<String, Scope>, SecurityError> {
    let mut authorities = HashMap::new();
    for token in raw.split(',') {
        let parts: Vec<&str> = token.split('.').collect();
        let &[action, resource, scope] = parts.as_slice() else {
            return Err(SecurityError::MalformedHeader {
                header: HEADER_AUTHORITIES,
            });
        };
        authorities.insert(permission_key(action, resource), Scope::from_token(scope));
    }
    Ok(authorities)
}
