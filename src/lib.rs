//! Header-trust security layer for services behind a trusted gateway.
//!
//! The gateway authenticates callers and injects identity/permission facts as
//! HTTP headers. This crate rebuilds an immutable per-request
//! [`SecurityContext`] from those headers, binds it to the request's task so
//! arbitrarily deep call chains can read it without parameter threading, and
//! enforces access rules at protected operation boundaries.
//!
//! SECURITY WARNING: headers are trusted as-is. Only deploy behind a gateway
//! that validates callers and strips client-supplied copies of these headers
//! (private network, no direct public access to the service).
//!
//! Wiring:
//! ```ignore
//! let config = SecurityConfig::from_env()?;
//! let app = middleware::apply(router, config);
//! ```
//!
//! Enforcement at a protected operation:
//! ```ignore
//! async fn list_orders() -> Result<Json<Vec<Order>>, SecurityError> {
//!     let ctx = enforce::require_authority("order", "read", Scope::Tenant)?;
//!     // ...
//! }
//! ```

pub mod config;
pub mod context;
pub mod enforce;
pub mod error;
pub mod middleware;
pub mod scope;

pub use config::SecurityConfig;
pub use context::{SecurityContext, SecurityCtx};
pub use error::SecurityError;
pub use scope::Scope;
