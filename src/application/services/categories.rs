//! Category lookups for the task form.

use crate::domain::{Category, TodoError};
use crate::infrastructure::repositories::CategoryRepository;

#[derive(Clone)]
pub struct CategoryService {
    categories: CategoryRepository,
}

impl CategoryService {
    #[must_use]
    pub const fn new(categories: CategoryRepository) -> Self {
        Self { categories }
    }

    pub async fn find_all(&self) -> Vec<Category> {
        self.categories.find_all().await
    }

    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when no category has the given id.
    pub async fn find_by_id(&self, id: i64) -> Result<Category, TodoError> {
        self.categories
            .find_by_id(id)
            .await
            .ok_or_else(|| TodoError::not_found("category", id))
    }

    /// Categories for the given ids; unknown ids are skipped.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Vec<Category> {
        self.categories.find_by_ids(ids).await
    }
}

// =============================================================================
// Tests
// =============================================================================
