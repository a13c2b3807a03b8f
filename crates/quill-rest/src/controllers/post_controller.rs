//! Post, comment, and like controller.

use crate::{
    extractors::{AuthenticatedUser, PaginationQuery},
    responses::{created, ok, ApiResponse, ApiResult, AppError},
    state::AppState,
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use quill_core::{CategoryId, FeedQuery, PageRequest, PostId};
use quill_service::{
    CommentResponse, CreateCommentRequest, CreatePostRequest, FeedResponse, PostResponse,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Creates the post router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_post))
        .route("/:id", get(get_post))
        .route("/:id/comments", post(add_comment).get(list_comments))
        .route("/:id/like", post(like_post).delete(unlike_post))
}

/// Like count after a like/unlike operation.
#[derive(Debug, Serialize)]
struct LikeCountResponse {
    like_count: i64,
}

/// Query parameters for the public feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl From<FeedParams> for FeedQuery {
    fn from(params: FeedParams) -> Self {
        FeedQuery {
            page: PageRequest::new(
                params.limit.unwrap_or(PageRequest::DEFAULT_LIMIT),
                params.offset.unwrap_or(0),
            ),
            search: params.search.filter(|s| !s.is_empty()),
            category_id: params.category_id.map(CategoryId::new),
        }
    }
}

/// Public feed of posts, newest first.
pub async fn feed(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> ApiResult<FeedResponse> {
    let response = state.post_service.feed(params.into()).await?;
    ok(response)
}

/// Create a post.
async fn create_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PostResponse>>), AppError> {
    debug!("Create post by user: {}", user.id);

    let response = state.post_service.create_post(user.id, request).await?;
    Ok(created(response))
}

/// Get a post with its like count.
async fn get_post(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<PostResponse> {
    let response = state.post_service.get_post(PostId::new(id)).await?;
    ok(response)
}

/// Comment on a post.
async fn add_comment(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponse>>), AppError> {
    debug!("Comment on post {} by user {}", id, user.id);

    let response = state
        .post_service
        .add_comment(PostId::new(id), user.id, request)
        .await?;
    Ok(created(response))
}

/// List comments on a post, oldest first.
async fn list_comments(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id): Path<i64>,
    Query(pagination): Query<PaginationQuery>,
) -> ApiResult<Vec<CommentResponse>> {
    let response = state
        .post_service
        .list_comments(PostId::new(id), pagination.into())
        .await?;
    ok(response)
}

/// Like a post (idempotent).
async fn like_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<LikeCountResponse> {
    debug!("Like post {} by user {}", id, user.id);

    let like_count = state.post_service.like_post(PostId::new(id), user.id).await?;
    ok(LikeCountResponse { like_count })
}

/// Remove a like.
async fn unlike_post(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> ApiResult<LikeCountResponse> {
    debug!("Unlike post {} by user {}", id, user.id);

    let like_count = state
        .post_service
        .unlike_post(PostId::new(id), user.id)
        .await?;
    ok(LikeCountResponse { like_count })
}
