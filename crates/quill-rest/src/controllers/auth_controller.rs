//! Authentication controller.

use crate::{
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use quill_service::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use tracing::debug;

/// Creates the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    debug!("Register request: {}", request.username);

    let response = state.auth_service.register(request).await?;
    Ok(created(response))
}

/// Log in and receive an access token.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    debug!("Login request: {}", request.username);

    let response = state.auth_service.login(request).await?;
    ok(response)
}
