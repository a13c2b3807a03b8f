//! User entity.

use crate::{UserId, UserRole};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// User entity representing a registered account.
///
/// The durable store is the source of truth; the same value is cached as
/// JSON with a short TTL, so every field must serialize round-trip cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier for the user.
    pub id: UserId,

    /// Unique username.
    #[validate(length(min = 3, max = 100))]
    pub username: String,

    /// User's email address.
    #[validate(email)]
    pub email: String,

    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    /// Short profile bio.
    pub bio: Option<String>,

    /// Hashed password (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Profile picture bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<Vec<u8>>,

    /// User's role.
    pub role: UserRole,

    /// Whether the account has been activated.
    pub is_active: bool,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new inactive user with the default role.
    ///
    /// The id is assigned by the durable store on save.
    #[must_use]
    pub fn new(username: String, email: String, name: String, password_hash: String) -> Self {
        Self {
            id: UserId::new(0),
            username,
            email,
            name,
            bio: None,
            password_hash,
            profile_picture: None,
            role: UserRole::User,
            is_active: false,
            created_at: Utc::now(),
        }
    }

    /// Checks if the user is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, UserRole::Admin)
    }

    /// Checks if the user has the specified role or higher.
    #[must_use]
    pub const fn has_role(&self, required: UserRole) -> bool {
        self.role.has_permission(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_is_never_serialized() {
        let mut user = User::new(
            "alice".into(),
            "alice@example.com".into(),
            "Alice".into(),
            "secret-hash".into(),
        );
        user.id = UserId::new(1);

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(!json.contains("password_hash"));
    }

    #[test]
    fn deserializes_without_password_hash() {
        let json = r#"{
            "id": 7,
            "username": "bob",
            "email": "bob@example.com",
            "name": "Bob",
            "bio": null,
            "role": "user",
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z"
        }"#;

        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, UserId::new(7));
        assert_eq!(user.password_hash, "");
    }
}
