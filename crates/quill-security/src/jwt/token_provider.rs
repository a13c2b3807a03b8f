//! JWT token provider for creating and validating tokens.

use super::Claims;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use quill_config::SecurityConfig;
use quill_core::{Interface, QuillError, QuillResult, User};
use shaku::Component;
use tracing::debug;

/// Interface for JWT issuance and validation.
pub trait TokenProviderInterface: Interface + Send + Sync {
    /// Generates an access token for a user.
    fn generate_token(&self, user: &User) -> QuillResult<String>;

    /// Validates an access token and returns its claims.
    fn validate_token(&self, token: &str) -> QuillResult<Claims>;

    /// Access token lifetime in seconds.
    fn expiration_secs(&self) -> u64;
}

/// JWT token provider service.
#[derive(Component, Clone)]
#[shaku(interface = TokenProviderInterface)]
pub struct TokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    audience: String,
    expiration_secs: u64,
}

impl TokenProvider {
    /// Creates a new token provider from the security configuration.
    #[must_use]
    pub fn new(config: &SecurityConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.jwt_issuer]);
        validation.set_audience(&[&config.jwt_audience]);
        validation.validate_exp = true;

        Self {
            encoding_key,
            decoding_key,
            validation,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
            expiration_secs: config.jwt_expiration_secs,
        }
    }

    /// The signing key, exposed for module wiring.
    #[must_use]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// The verification key, exposed for module wiring.
    #[must_use]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// The validation settings, exposed for module wiring.
    #[must_use]
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// The configured issuer.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// The configured audience.
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }
}

impl TokenProviderInterface for TokenProvider {
    fn generate_token(&self, user: &User) -> QuillResult<String> {
        let expires_at = Utc::now() + Duration::seconds(self.expiration_secs as i64);
        let claims = Claims::new(
            user.id,
            user.username.clone(),
            user.role,
            self.issuer.clone(),
            self.audience.clone(),
            expires_at,
        );

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| QuillError::Internal(format!("Failed to sign token: {e}")))
    }

    fn validate_token(&self, token: &str) -> QuillResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            debug!("Token validation failed: {}", e);
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => QuillError::TokenExpired,
                _ => QuillError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }

    fn expiration_secs(&self) -> u64 {
        self.expiration_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{UserId, UserRole};

    fn test_user() -> User {
        let mut user = User::new(
            "alice".into(),
            "alice@example.com".into(),
            "Alice".into(),
            "hash".into(),
        );
        user.id = UserId::new(42);
        user.role = UserRole::Moderator;
        user
    }

    fn provider() -> TokenProvider {
        TokenProvider::new(&SecurityConfig {
            jwt_secret: "test-secret".into(),
            jwt_expiration_secs: 3600,
            jwt_issuer: "quill".into(),
            jwt_audience: "quill".into(),
        })
    }

    #[test]
    fn issued_tokens_validate() {
        let provider = provider();
        let token = provider.generate_token(&test_user()).unwrap();
        let claims = provider.validate_token(&token).unwrap();

        assert_eq!(claims.user_id().unwrap(), UserId::new(42));
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, UserRole::Moderator);
    }

    #[test]
    fn garbage_tokens_are_rejected() {
        let provider = provider();
        assert!(matches!(
            provider.validate_token("not.a.token"),
            Err(QuillError::InvalidToken(_))
        ));
    }

    #[test]
    fn tokens_from_other_secrets_are_rejected() {
        let provider = provider();
        let other = TokenProvider::new(&SecurityConfig {
            jwt_secret: "different-secret".into(),
            jwt_expiration_secs: 3600,
            jwt_issuer: "quill".into(),
            jwt_audience: "quill".into(),
        });

        let token = other.generate_token(&test_user()).unwrap();
        assert!(provider.validate_token(&token).is_err());
    }
}
