//! Authenticated user extractor.

use crate::middleware::CurrentUser;
use crate::responses::ApiResponse;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use quill_core::{ErrorResponse, QuillError, QuillResult, UserRole};

/// Extractor for the authenticated caller.
///
/// Reads the [`CurrentUser`] attached by the auth middleware; a missing
/// entry means the token was absent, invalid, or expired.
pub struct AuthenticatedUser(pub CurrentUser);

impl std::ops::Deref for AuthenticatedUser {
    type Target = CurrentUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AuthenticatedUser {
    /// Rejects callers below the required role with a Forbidden error.
    pub fn require_role(&self, required: UserRole) -> QuillResult<()> {
        if self.0.role.has_permission(required) {
            Ok(())
        } else {
            Err(QuillError::forbidden(format!("Requires {required} role")))
        }
    }
}

/// Error type for authentication extraction.
pub struct AuthError(pub QuillError);

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);

        let error_response = ErrorResponse::from_error(&self.0);
        let body = Json(ApiResponse::<()>::error(error_response));

        (status, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let current = parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            AuthError(QuillError::unauthorized("Invalid or missing token"))
        })?;

        Ok(AuthenticatedUser(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::UserId;

    fn caller(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser(CurrentUser {
            id: UserId::new(1),
            username: "alice".into(),
            role,
        })
    }

    #[test]
    fn admin_passes_admin_gate() {
        assert!(caller(UserRole::Admin).require_role(UserRole::Admin).is_ok());
    }

    #[test]
    fn regular_user_is_forbidden_from_admin_routes() {
        let err = caller(UserRole::User)
            .require_role(UserRole::Admin)
            .unwrap_err();
        assert!(matches!(err, QuillError::Forbidden(_)));
    }
}
