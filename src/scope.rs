//! Permission scope levels and permission keys.
//!
//! A permission is identified by its canonical `action.resource` key; the
//! scope attached to it bounds how broadly the action may reach.

use std::fmt;

/// Breadth of access granted for a permission, ordered narrow to wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    /// No access. Also the fallback when a scope token fails to parse.
    None = 0,
    /// The caller's own resources only.
    Own = 1,
    /// Resources within the caller's tenant/organization.
    Tenant = 2,
    /// System-wide access.
    All = 3,
}

impl Scope {
    /// Parse a scope token, case-insensitively.
    ///
    /// Unrecognized tokens map to [`Scope::None`] so a parse failure can never
    /// widen access.
    pub fn from_token(token: &str) -> Self {
        match token.to_ascii_lowercase().as_str() {
            "own" => Self::Own,
            "tenant" => Self::Tenant,
            "all" => Self::All,
            _ => Self::None,
        }
    }

    /// Numeric breadth level (0-3).
    pub fn value(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::None => "none",
            Self::Own => "own",
            Self::Tenant => "tenant",
            Self::All => "all",
        };
        f.write_str(token)
    }
}

/// Canonical `action.resource` key identifying a protectable capability.
pub fn permission_key(action: &str, resource: &str) -> String {
    format!("{action}.{resource}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_token_is_case_insensitive() {
        assert_eq!(Scope::from_token("own"), Scope::Own);
        assert_eq!(Scope::from_token("OWN"), Scope::Own);
        assert_eq!(Scope::from_token("Tenant"), Scope::Tenant);
        assert_eq!(Scope::from_token("aLL"), Scope::All);
        assert_eq!(Scope::from_token("none"), Scope::None);
    }

    #[test]
    fn unrecognized_token_yields_none() {
        assert_eq!(Scope::from_token("bogus"), Scope::None);
        assert_eq!(Scope::from_token(""), Scope::None);
        assert_eq!(Scope::from_token("own "), Scope::None);
    }

    #[test]
    fn scopes_are_ordered_by_breadth() {
        assert!(Scope::None < Scope::Own);
        assert!(Scope::Own < Scope::Tenant);
        assert!(Scope::Tenant < Scope::All);
        assert_eq!(Scope::All.value(), 3);
        assert_eq!(Scope::None.value(), 0);
    }

    #[test]
    fn permission_key_is_action_dot_resource() {
        assert_eq!(permission_key("read", "order"), "read.order");
    }

    #[test]
    fn display_matches_tokens() {
        assert_eq!(Scope::Tenant.to_string(), "tenant");
        assert_eq!(Scope::from_token(&Scope::Own.to_string()), Scope::Own);
    }
}
