//! SQLite-backed category storage.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::Category;

// =============================================================================
// CategoryRepository
// =============================================================================

#[derive(Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All categories ordered by id.
    pub async fn find_all(&self) -> Vec<Category> {
        match self.try_find_all().await {
            Ok(categories) => categories,
            Err(error) => {
                tracing::error!("Failed to list categories: {error}");
                Vec::new()
            }
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Category> {
        match self.try_find_by_id(id).await {
            Ok(found) => found,
            Err(error) => {
                tracing::error!("Failed to find category by id {id}: {error}");
                None
            }
        }
    }

    /// Categories whose id is in `ids`, ordered by id. Unknown ids are
    /// silently skipped; an empty id list yields an empty result without
    /// touching the store.
    pub async fn find_by_ids(&self, ids: &[i64]) -> Vec<Category> {
        match self.try_find_by_ids(ids).await {
            Ok(categories) => categories,
            Err(error) => {
                tracing::error!("Failed to find categories by ids {ids:?}: {error}");
                Vec::new()
            }
        }
    }

    pub async fn add(&self, category: &Category) -> Option<Category> {
        match self.try_add(category).await {
            Ok(persisted) => Some(persisted),
            Err(error) => {
                tracing::error!("Failed to add category '{}': {error}", category.name);
                None
            }
        }
    }

    pub async fn update(&self, category: &Category) -> Option<Category> {
        match self.try_update(category).await {
            Ok(updated) => updated,
            Err(error) => {
                tracing::error!("Failed to update category {}: {error}", category.id);
                None
            }
        }
    }

    pub async fn delete_by_id(&self, id: i64) {
        if let Err(error) = self.try_delete_by_id(id).await {
            tracing::error!("Failed to delete category {id}: {error}");
        }
    }

    async fn try_find_all(&self) -> Result<Vec<Category>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query("SELECT id, name FROM categories ORDER BY id")
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        rows.iter().map(category_from_row).collect()
    }

    async fn try_find_by_id(&self, id: i64) -> Result<Option<Category>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query("SELECT id, name FROM categories WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        row.as_ref().map(category_from_row).transpose()
    }

    async fn try_find_by_ids(&self, ids: &[i64]) -> Result<Vec<Category>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; ids.len()].join(", ");
        let statement =
            format!("SELECT id, name FROM categories WHERE id IN ({placeholders}) ORDER BY id");
        let mut query = sqlx::query(&statement);
        for id in ids {
            query = query.bind(*id);
        }

        let mut tx = self.pool.begin().await?;
        let rows = query.fetch_all(&mut *tx).await?;
        tx.commit().await?;

        rows.iter().map(category_from_row).collect()
    }

    async fn try_add(&self, category: &Category) -> Result<Category, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("INSERT INTO categories (name) VALUES (?)")
            .bind(&category.name)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let mut persisted = category.clone();
        persisted.id = result.last_insert_rowid();
        Ok(persisted)
    }

    async fn try_update(&self, category: &Category) -> Result<Option<Category>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE categories SET name = ? WHERE id = ?")
            .bind(&category.name)
            .bind(category.id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        tx.commit().await?;

        Ok(Some(category.clone()))
    }

    async fn try_delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

fn category_from_row(row: &SqliteRow) -> Result<Category, sqlx::Error> {
    Ok(Category {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

// =============================================================================
// Tests
// =============================================================================
