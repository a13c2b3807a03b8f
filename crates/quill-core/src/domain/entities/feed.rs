//! Public feed read model.

use crate::{CategoryId, PageRequest, PostId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Filters for the public post feed.
#[derive(Debug, Clone, Default)]
pub struct FeedQuery {
    /// Pagination window.
    pub page: PageRequest,
    /// Case-insensitive substring match on title or content.
    pub search: Option<String>,
    /// Restrict to posts in this category.
    pub category_id: Option<CategoryId>,
}

/// One feed entry: a post joined with its author and category names.
///
/// The names are nullable because the joins are left joins; a deleted
/// author or category leaves the post in the feed without the label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedItem {
    pub post_id: PostId,
    pub title: String,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub updated_at: DateTime<Utc>,
}
