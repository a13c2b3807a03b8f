//! User role value object.

use serde::{Deserialize, Serialize};
use std::fmt;

/// User roles with hierarchical permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Regular user with basic permissions.
    #[default]
    User,
    /// Moderator with elevated permissions.
    Moderator,
    /// Administrator with full access.
    Admin,
}

impl UserRole {
    /// Returns the role's permission level (higher = more permissions).
    #[must_use]
    pub const fn level(&self) -> u8 {
        match self {
            Self::User => 1,
            Self::Moderator => 2,
            Self::Admin => 3,
        }
    }

    /// Checks if this role has at least the permissions of the required role.
    #[must_use]
    pub const fn has_permission(&self, required: Self) -> bool {
        self.level() >= required.level()
    }

    /// Parses a role from its database representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "user" => Some(Self::User),
            "moderator" | "mod" => Some(Self::Moderator),
            "admin" | "administrator" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Moderator => write!(f, "moderator"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_precedence() {
        assert!(UserRole::Admin.has_permission(UserRole::Moderator));
        assert!(UserRole::Moderator.has_permission(UserRole::User));
        assert!(!UserRole::User.has_permission(UserRole::Moderator));
    }

    #[test]
    fn parses_database_values() {
        assert_eq!(UserRole::parse("admin"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("User"), Some(UserRole::User));
        assert_eq!(UserRole::parse("root"), None);
    }
}
