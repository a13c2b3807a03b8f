//! Category controller.

use crate::{
    extractors::AuthenticatedUser,
    responses::{created, no_content, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use quill_core::{CategoryId, UserRole};
use quill_service::{CategoryRequest, CategoryResponse};
use tracing::debug;

/// Creates the category router.
///
/// Listing is public; mutations are restricted to administrators inside
/// the handlers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories).post(create_category))
        .route("/:id", patch(update_category).delete(delete_category))
}

/// List all categories, ordered by name.
async fn list_categories(State(state): State<AppState>) -> ApiResult<Vec<CategoryResponse>> {
    let response = state.category_service.list_categories().await?;
    ok(response)
}

/// Create a category (admin only).
async fn create_category(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryResponse>>), AppError> {
    debug!("Create category by user: {}", user.id);

    user.require_role(UserRole::Admin)?;
    let response = state.category_service.create_category(request).await?;
    Ok(created(response))
}

/// Rename a category (admin only).
async fn update_category(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<CategoryRequest>,
) -> ApiResult<CategoryResponse> {
    debug!("Update category {} by user {}", id, user.id);

    user.require_role(UserRole::Admin)?;
    let response = state
        .category_service
        .update_category(CategoryId::new(id), request)
        .await?;
    ok(response)
}

/// Delete a category (admin only).
async fn delete_category(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    debug!("Delete category {} by user {}", id, user.id);

    user.require_role(UserRole::Admin)?;
    state
        .category_service
        .delete_category(CategoryId::new(id))
        .await?;
    Ok(no_content())
}
