//! PostgreSQL comment repository implementation.

use crate::{pool::DatabasePoolInterface, traits::CommentRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{Comment, CommentId, PageRequest, PostId, QuillResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL comment repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CommentRepository)]
pub struct PgCommentRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgCommentRepository {
    /// Creates a new PostgreSQL comment repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Comment {
            id: CommentId::new(row.id),
            post_id: PostId::new(row.post_id),
            user_id: UserId::new(row.user_id),
            content: row.content,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn save(&self, comment: &Comment) -> QuillResult<Comment> {
        debug!(
            "Saving comment by user {} on post {}",
            comment.user_id, comment.post_id
        );

        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, post_id, user_id, content, created_at
            "#,
        )
        .bind(comment.post_id.into_inner())
        .bind(comment.user_id.into_inner())
        .bind(&comment.content)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Comment::from(row))
    }

    async fn find_by_post(&self, post_id: PostId, page: PageRequest) -> QuillResult<Vec<Comment>> {
        debug!("Listing comments for post {}", post_id);

        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, user_id, content, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(post_id.into_inner())
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }
}
