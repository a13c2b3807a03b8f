//! Authentication middleware.
//!
//! Resolves the bearer token to a full user through the user cache, so a
//! warm cache saves the durable round trip on every authenticated request.

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use quill_core::{UserId, UserRole};
use quill_security::TokenProviderInterface;
use quill_service::UserService;
use std::sync::Arc;
use tracing::debug;

/// The authenticated caller, stored as a request extension.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub username: String,
    pub role: UserRole,
}

/// Authentication middleware state.
#[derive(Clone)]
pub struct AuthMiddlewareState {
    pub token_provider: Arc<dyn TokenProviderInterface>,
    pub user_service: Arc<dyn UserService>,
}

impl AuthMiddlewareState {
    #[must_use]
    pub fn new(
        token_provider: Arc<dyn TokenProviderInterface>,
        user_service: Arc<dyn UserService>,
    ) -> Self {
        Self {
            token_provider,
            user_service,
        }
    }
}

/// Validates the bearer token and attaches the current user.
///
/// Invalid or absent tokens do not reject here; handlers that need auth are
/// wrapped with [`require_auth`], which turns a missing user into a 401.
pub async fn auth_middleware(
    State(state): State<AuthMiddlewareState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    if let Some(token) = token {
        match state.token_provider.validate_token(token) {
            Ok(claims) => match claims.user_id() {
                Ok(user_id) => match state.user_service.resolve_user(user_id).await {
                    Ok(user) if user.is_active => {
                        debug!("Authenticated user: {}", user.username);
                        request.extensions_mut().insert(CurrentUser {
                            id: user.id,
                            username: user.username,
                            role: user.role,
                        });
                    }
                    Ok(_) => debug!("Rejecting token for inactive user {}", user_id),
                    Err(e) => debug!("Failed to resolve token subject {}: {}", user_id, e),
                },
                Err(e) => debug!("Malformed token subject: {}", e),
            },
            Err(e) => debug!("Token validation failed: {}", e),
        }
    }

    next.run(request).await
}

/// Middleware that requires authentication.
///
/// Returns 401 if no valid user was attached by [`auth_middleware`].
pub async fn require_auth(request: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    if request.extensions().get::<CurrentUser>().is_none() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}
