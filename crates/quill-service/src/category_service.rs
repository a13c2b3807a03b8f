//! Category service.

use crate::dto::{CategoryRequest, CategoryResponse};
use async_trait::async_trait;
use quill_core::{Category, CategoryId, Interface, QuillError, QuillResult};
use quill_repository::CategoryRepository;
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

/// Category management.
///
/// Listing is open to everyone; the HTTP layer restricts mutations to
/// administrators.
#[async_trait]
pub trait CategoryService: Interface + Send + Sync {
    /// Lists all categories, ordered by name.
    async fn list_categories(&self) -> QuillResult<Vec<CategoryResponse>>;

    /// Creates a category. Duplicate names are a Conflict.
    async fn create_category(&self, request: CategoryRequest) -> QuillResult<CategoryResponse>;

    /// Renames a category. Duplicate names are a Conflict.
    async fn update_category(
        &self,
        id: CategoryId,
        request: CategoryRequest,
    ) -> QuillResult<CategoryResponse>;

    /// Deletes a category. Posts filed under it keep existing without one.
    async fn delete_category(&self, id: CategoryId) -> QuillResult<()>;
}

/// Concrete category service for Shaku DI.
#[derive(Component)]
#[shaku(interface = CategoryService)]
pub struct CategoryServiceComponent {
    #[shaku(inject)]
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryServiceComponent {
    #[must_use]
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }
}

#[async_trait]
impl CategoryService for CategoryServiceComponent {
    async fn list_categories(&self) -> QuillResult<Vec<CategoryResponse>> {
        let categories = self.categories.find_all().await?;
        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    async fn create_category(&self, request: CategoryRequest) -> QuillResult<CategoryResponse> {
        debug!("Creating category: {}", request.name);

        request.validate()?;

        let saved = self.categories.save(&Category::new(request.name)).await?;

        info!("Category created: {} ({})", saved.name, saved.id);
        Ok(CategoryResponse::from(saved))
    }

    async fn update_category(
        &self,
        id: CategoryId,
        request: CategoryRequest,
    ) -> QuillResult<CategoryResponse> {
        debug!("Renaming category {} to {}", id, request.name);

        request.validate()?;

        let category = Category {
            id,
            name: request.name,
        };
        let affected = self.categories.update(&category).await?;
        if affected == 0 {
            return Err(QuillError::not_found("Category", id));
        }

        Ok(CategoryResponse::from(category))
    }

    async fn delete_category(&self, id: CategoryId) -> QuillResult<()> {
        debug!("Deleting category: {}", id);

        let affected = self.categories.delete(id).await?;
        if affected == 0 {
            return Err(QuillError::not_found("Category", id));
        }

        info!("Category deleted: {}", id);
        Ok(())
    }
}

impl std::fmt::Debug for CategoryServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CategoryServiceComponent")
            .finish_non_exhaustive()
    }
}
