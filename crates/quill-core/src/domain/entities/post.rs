//! Post entity.

use crate::{CategoryId, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Post {
    /// Unique identifier for the post.
    pub id: PostId,

    /// The author of the post.
    pub user_id: UserId,

    /// Post title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Post body.
    #[validate(length(min = 1))]
    pub content: String,

    /// The category this post is filed under, if any.
    pub category_id: Option<CategoryId>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Creates a new post draft; the id is assigned on save.
    #[must_use]
    pub fn new(user_id: UserId, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: PostId::new(0),
            user_id,
            title,
            content,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks whether the given user authored this post.
    #[must_use]
    pub const fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id.0 == user_id.0
    }
}
