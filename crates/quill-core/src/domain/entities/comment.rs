//! Comment entity.

use crate::{CommentId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Comment {
    /// Unique identifier for the comment.
    pub id: CommentId,

    /// The post this comment belongs to.
    pub post_id: PostId,

    /// The comment author.
    pub user_id: UserId,

    /// Comment body.
    #[validate(length(min = 1, max = 2000))]
    pub content: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a new comment; the id is assigned on save.
    #[must_use]
    pub fn new(post_id: PostId, user_id: UserId, content: String) -> Self {
        Self {
            id: CommentId::new(0),
            post_id,
            user_id,
            content,
            created_at: Utc::now(),
        }
    }
}
