//! User controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use quill_core::UserId;
use quill_service::{UpdateProfileRequest, UserResponse};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me).put(update_me))
        .route("/:id", get(get_user))
}

/// Get the authenticated user's profile.
async fn get_me(State(state): State<AppState>, user: AuthenticatedUser) -> ApiResult<UserResponse> {
    debug!("Get own profile: {}", user.id);

    let response = state.user_service.get_user(user.id).await?;
    ok(response)
}

/// Update the authenticated user's profile.
async fn update_me(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<UpdateProfileRequest>,
) -> ApiResult<UserResponse> {
    debug!("Update own profile: {}", user.id);

    let response = state.user_service.update_profile(user.id, request).await?;
    ok(response)
}

/// Get a user by ID.
async fn get_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<UserResponse> {
    debug!("Get user: {}", id);

    let response = state.user_service.get_user(UserId::new(id)).await?;
    ok(response)
}
