//! JWT claims structure.

use chrono::{DateTime, Utc};
use quill_core::{QuillError, QuillResult, UserId, UserRole};
use serde::{Deserialize, Serialize};

/// JWT claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID as a decimal string).
    pub sub: String,

    /// Username.
    pub username: String,

    /// User's role.
    pub role: UserRole,

    /// Issued at timestamp.
    pub iat: i64,

    /// Expiration timestamp.
    pub exp: i64,

    /// Issuer.
    pub iss: String,

    /// Audience.
    pub aud: String,
}

impl Claims {
    /// Creates new access token claims.
    #[must_use]
    pub fn new(
        user_id: UserId,
        username: String,
        role: UserRole,
        issuer: String,
        audience: String,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: user_id.to_string(),
            username,
            role,
            iat: Utc::now().timestamp(),
            exp: expires_at.timestamp(),
            iss: issuer,
            aud: audience,
        }
    }

    /// Returns the subject as a typed user ID.
    pub fn user_id(&self) -> QuillResult<UserId> {
        self.sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| QuillError::InvalidToken(format!("Invalid subject: {}", self.sub)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_parses_back_to_user_id() {
        let claims = Claims::new(
            UserId::new(42),
            "alice".into(),
            UserRole::User,
            "quill".into(),
            "quill".into(),
            Utc::now() + chrono::Duration::hours(1),
        );
        assert_eq!(claims.user_id().unwrap(), UserId::new(42));
    }

    #[test]
    fn malformed_subject_is_rejected() {
        let mut claims = Claims::new(
            UserId::new(1),
            "alice".into(),
            UserRole::User,
            "quill".into(),
            "quill".into(),
            Utc::now(),
        );
        claims.sub = "not-a-number".into();
        assert!(matches!(
            claims.user_id(),
            Err(QuillError::InvalidToken(_))
        ));
    }
}
