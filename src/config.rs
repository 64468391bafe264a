/*
 * Responsibility
 * - Configuration surface of the security layer (internal secret + prefix)
 * - Environment loading with validation (missing secret fails fast at startup)
 */
use std::fmt;

/// Path prefix reserved for service-to-service endpoints.
pub const DEFAULT_INTERNAL_PREFIX: &str = "/internal/";

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration shared by the internal guard and the extraction middleware.
///
/// Clone is expected: `middleware::apply` hands one copy to each stage.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared secret that internal callers present in `X-Internal-Secret`.
    pub internal_secret: String,
    /// Paths under this prefix are treated as internal endpoints.
    pub internal_prefix: String,
}

impl SecurityConfig {
    pub fn new(internal_secret: impl Into<String>) -> Self {
        Self {
            internal_secret: internal_secret.into(),
            internal_prefix: DEFAULT_INTERNAL_PREFIX.to_string(),
        }
    }

    pub fn with_internal_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.internal_prefix = prefix.into();
        self
    }

    /// Load from the environment.
    ///
    /// - `SECURITY_INTERNAL_SECRET` (required)
    /// - `SECURITY_INTERNAL_PREFIX` (optional, defaults to `/internal/`)
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let internal_secret = std::env::var("SECURITY_INTERNAL_SECRET")
            .map_err(|_| ConfigError::Missing("SECURITY_INTERNAL_SECRET"))?;

        let internal_prefix = std::env::var("SECURITY_INTERNAL_PREFIX")
            .unwrap_or_else(|_| DEFAULT_INTERNAL_PREFIX.to_string());

        if internal_prefix.is_empty() {
            return Err(ConfigError::Invalid("SECURITY_INTERNAL_PREFIX"));
        }

        Ok(Self {
            internal_secret,
            internal_prefix,
        })
    }
}
