//! Post and comment DTOs.

use chrono::{DateTime, Utc};
use quill_core::{CategoryId, Comment, CommentId, FeedItem, Post, PostId, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Post creation request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

/// Public representation of a post, with its like count.
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub user_id: UserId,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    #[must_use]
    pub fn from_post(post: Post, like_count: i64) -> Self {
        Self {
            id: post.id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            category_id: post.category_id,
            like_count,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// A page of the public feed.
#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub items: Vec<FeedItem>,
    pub count: usize,
}

/// Comment creation request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 2000, message = "Content must be 1-2000 characters"))]
    pub content: String,
}

/// Public representation of a comment.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            user_id: comment.user_id,
            content: comment.content,
            created_at: comment.created_at,
        }
    }
}
