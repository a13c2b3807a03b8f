//! Authentication service: registration and login.

use crate::dto::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use async_trait::async_trait;
use quill_core::{Interface, QuillError, QuillResult, User};
use quill_repository::UserRepository;
use quill_security::{PasswordHasherInterface, TokenProviderInterface};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// Registration and login.
#[async_trait]
pub trait AuthService: Interface + Send + Sync {
    /// Registers a new account with the default role.
    async fn register(&self, request: RegisterRequest) -> QuillResult<UserResponse>;

    /// Verifies credentials and issues an access token.
    async fn login(&self, request: LoginRequest) -> QuillResult<LoginResponse>;
}

/// Concrete auth service for Shaku DI.
#[derive(Component)]
#[shaku(interface = AuthService)]
pub struct AuthServiceComponent {
    #[shaku(inject)]
    users: Arc<dyn UserRepository>,
    #[shaku(inject)]
    password_hasher: Arc<dyn PasswordHasherInterface>,
    #[shaku(inject)]
    token_provider: Arc<dyn TokenProviderInterface>,
}

impl AuthServiceComponent {
    #[must_use]
    pub fn new(
        users: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasherInterface>,
        token_provider: Arc<dyn TokenProviderInterface>,
    ) -> Self {
        Self {
            users,
            password_hasher,
            token_provider,
        }
    }
}

#[async_trait]
impl AuthService for AuthServiceComponent {
    async fn register(&self, request: RegisterRequest) -> QuillResult<UserResponse> {
        debug!("Registering user: {}", request.username);

        request.validate()?;

        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(QuillError::conflict(format!(
                "Username '{}' already exists",
                request.username
            )));
        }

        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(QuillError::conflict(format!(
                "Email '{}' already exists",
                request.email
            )));
        }

        let password_hash = self.password_hasher.hash(&request.password)?;

        let mut user = User::new(request.username, request.email, request.name, password_hash);
        user.is_active = true;

        let saved = self.users.save(&user).await?;

        info!("User registered: {}", saved.id);
        Ok(UserResponse::from(saved))
    }

    async fn login(&self, request: LoginRequest) -> QuillResult<LoginResponse> {
        debug!("Login attempt for: {}", request.username);

        request.validate()?;

        let user = self
            .users
            .find_by_username(&request.username)
            .await?
            .ok_or(QuillError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&request.password, &user.password_hash)?
        {
            return Err(QuillError::InvalidCredentials);
        }

        if !user.is_active {
            return Err(QuillError::forbidden("Account is not active"));
        }

        let access_token = self.token_provider.generate_token(&user)?;

        info!("User logged in: {}", user.id);
        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.token_provider.expiration_secs(),
            user: UserResponse::from(user),
        })
    }
}

impl std::fmt::Debug for AuthServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthServiceComponent").finish_non_exhaustive()
    }
}
