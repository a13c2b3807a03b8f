//! PostgreSQL post repository implementation.

use crate::{pool::DatabasePoolInterface, traits::PostRepository};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quill_core::{CategoryId, FeedItem, FeedQuery, Post, PostId, QuillResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL post repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PostRepository)]
pub struct PgPostRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgPostRepository {
    /// Creates a new PostgreSQL post repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
    category_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: PostId::new(row.id),
            user_id: UserId::new(row.user_id),
            title: row.title,
            content: row.content,
            category_id: row.category_id.map(CategoryId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Feed row with author and category names resolved via left joins.
#[derive(Debug, FromRow)]
struct FeedRow {
    post_id: i64,
    title: String,
    user_id: i64,
    author: Option<String>,
    category_id: Option<i64>,
    category: Option<String>,
    updated_at: DateTime<Utc>,
}

impl From<FeedRow> for FeedItem {
    fn from(row: FeedRow) -> Self {
        FeedItem {
            post_id: PostId::new(row.post_id),
            title: row.title,
            user_id: UserId::new(row.user_id),
            author: row.author,
            category_id: row.category_id.map(CategoryId::new),
            category: row.category,
            updated_at: row.updated_at,
        }
    }
}

const POST_COLUMNS: &str = "id, user_id, title, content, category_id, created_at, updated_at";

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: PostId) -> QuillResult<Option<Post>> {
        debug!("Finding post by id: {}", id);

        let row = sqlx::query_as::<_, PostRow>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn save(&self, post: &Post) -> QuillResult<Post> {
        debug!("Saving post by user {}: {}", post.user_id, post.title);

        let row = sqlx::query_as::<_, PostRow>(&format!(
            r#"
            INSERT INTO posts (user_id, title, content, category_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(post.user_id.into_inner())
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.category_id.map(CategoryId::into_inner))
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Post::from(row))
    }

    async fn feed(&self, query: &FeedQuery) -> QuillResult<Vec<FeedItem>> {
        debug!(
            "Listing feed (search: {:?}, category: {:?})",
            query.search, query.category_id
        );

        let rows = sqlx::query_as::<_, FeedRow>(
            r#"
            SELECT p.id AS post_id, p.title, p.user_id,
                   u.name AS author,
                   p.category_id, c.name AS category,
                   p.updated_at
            FROM posts p
            LEFT JOIN users u ON u.id = p.user_id
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE ($3::text IS NULL
                   OR p.title ILIKE '%' || $3 || '%'
                   OR p.content ILIKE '%' || $3 || '%')
              AND ($4::bigint IS NULL OR p.category_id = $4)
            ORDER BY p.created_at DESC, p.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(query.page.limit)
        .bind(query.page.offset)
        .bind(query.search.as_deref())
        .bind(query.category_id.map(CategoryId::into_inner))
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(FeedItem::from).collect())
    }
}
