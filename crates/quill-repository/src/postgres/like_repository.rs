//! PostgreSQL post like repository implementation.

use crate::{pool::DatabasePoolInterface, traits::PostLikeRepository};
use async_trait::async_trait;
use quill_core::{PostId, QuillResult, UserId};
use shaku::Component;
use sqlx::Row;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL post like repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PostLikeRepository)]
pub struct PgPostLikeRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgPostLikeRepository {
    /// Creates a new PostgreSQL post like repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostLikeRepository for PgPostLikeRepository {
    async fn add(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool> {
        debug!("User {} liking post {}", user_id, post_id);

        let result = sqlx::query(
            r#"
            INSERT INTO post_likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool> {
        debug!("User {} unliking post {}", user_id, post_id);

        let result = sqlx::query("DELETE FROM post_likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id.into_inner())
            .bind(user_id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, post_id: PostId, user_id: UserId) -> QuillResult<bool> {
        let row = sqlx::query(
            "SELECT EXISTS (SELECT 1 FROM post_likes WHERE post_id = $1 AND user_id = $2) AS liked",
        )
        .bind(post_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_one(self.pool.inner())
        .await?;

        Ok(row.try_get::<bool, _>("liked")?)
    }

    async fn count(&self, post_id: PostId) -> QuillResult<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS cnt FROM post_likes WHERE post_id = $1")
            .bind(post_id.into_inner())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(row.try_get::<i64, _>("cnt")?)
    }
}
