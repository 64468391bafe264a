/*!
 * Per-request security context and its propagation channel
 *
 * Responsibility:
 * - SecurityContext: immutable snapshot built from trusted gateway headers
 * - task-local binding: one context per request extent, invisible outside it
 * - SecurityCtx: axum extractor handing the context to handlers
 *
 * Public API:
 * - SecurityContext
 * - SecurityCtx
 * - current() / with_context()
 */

mod current;
mod extract;
mod types;

pub use current::{current, with_context};
pub use extract::SecurityCtx;
pub use types::SecurityContext;
