//! PostgreSQL category repository implementation.

use crate::{pool::DatabasePoolInterface, traits::CategoryRepository};
use async_trait::async_trait;
use quill_core::{Category, CategoryId, QuillResult};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// PostgreSQL category repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CategoryRepository)]
pub struct PgCategoryRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl PgCategoryRepository {
    /// Creates a new PostgreSQL category repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category {
            id: CategoryId::new(row.id),
            name: row.name,
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn find_by_id(&self, id: CategoryId) -> QuillResult<Option<Category>> {
        debug!("Finding category by id: {}", id);

        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name FROM categories WHERE id = $1",
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Category::from))
    }

    async fn find_all(&self) -> QuillResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name FROM categories ORDER BY name",
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn save(&self, category: &Category) -> QuillResult<Category> {
        debug!("Saving category: {}", category.name);

        // A duplicate name trips the unique constraint, which the error
        // conversion surfaces as a Conflict.
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&category.name)
        .fetch_one(self.pool.inner())
        .await?;

        Ok(Category::from(row))
    }

    async fn update(&self, category: &Category) -> QuillResult<u64> {
        debug!("Updating category: {}", category.id);

        let result = sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(category.id.into_inner())
            .bind(&category.name)
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: CategoryId) -> QuillResult<u64> {
        debug!("Deleting category: {}", id);

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}
