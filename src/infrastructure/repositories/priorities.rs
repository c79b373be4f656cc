//! SQLite-backed priority storage.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::Priority;

// =============================================================================
// PriorityRepository
// =============================================================================

#[derive(Clone)]
pub struct PriorityRepository {
    pool: SqlitePool,
}

impl PriorityRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All priorities ordered by position, most urgent first.
    pub async fn find_all(&self) -> Vec<Priority> {
        match self.try_find_all().await {
            Ok(priorities) => priorities,
            Err(error) => {
                tracing::error!("Failed to list priorities: {error}");
                Vec::new()
            }
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Priority> {
        match self.try_find_by_id(id).await {
            Ok(found) => found,
            Err(error) => {
                tracing::error!("Failed to find priority by id {id}: {error}");
                None
            }
        }
    }

    pub async fn find_by_name(&self, name: &str) -> Option<Priority> {
        match self.try_find_by_name(name).await {
            Ok(found) => found,
            Err(error) => {
                tracing::error!("Failed to find priority by name '{name}': {error}");
                None
            }
        }
    }

    pub async fn add(&self, priority: &Priority) -> Option<Priority> {
        match self.try_add(priority).await {
            Ok(persisted) => Some(persisted),
            Err(error) => {
                tracing::error!("Failed to add priority '{}': {error}", priority.name);
                None
            }
        }
    }

    pub async fn update(&self, priority: &Priority) -> Option<Priority> {
        match self.try_update(priority).await {
            Ok(updated) => updated,
            Err(error) => {
                tracing::error!("Failed to update priority {}: {error}", priority.id);
                None
            }
        }
    }

    pub async fn delete_by_id(&self, id: i64) {
        if let Err(error) = self.try_delete_by_id(id).await {
            tracing::error!("Failed to delete priority {id}: {error}");
        }
    }

    async fn try_find_all(&self) -> Result<Vec<Priority>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query("SELECT id, name, position FROM priorities ORDER BY position")
            .fetch_all(&mut *tx)
            .await?;
        tx.commit().await?;

        rows.iter().map(priority_from_row).collect()
    }

    async fn try_find_by_id(&self, id: i64) -> Result<Option<Priority>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query("SELECT id, name, position FROM priorities WHERE id = ?")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        row.as_ref().map(priority_from_row).transpose()
    }

    async fn try_find_by_name(&self, name: &str) -> Result<Option<Priority>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query("SELECT id, name, position FROM priorities WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;
        tx.commit().await?;

        row.as_ref().map(priority_from_row).transpose()
    }

    async fn try_add(&self, priority: &Priority) -> Result<Priority, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("INSERT INTO priorities (name, position) VALUES (?, ?)")
            .bind(&priority.name)
            .bind(priority.position)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let mut persisted = priority.clone();
        persisted.id = result.last_insert_rowid();
        Ok(persisted)
    }

    async fn try_update(&self, priority: &Priority) -> Result<Option<Priority>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query("UPDATE priorities SET name = ?, position = ? WHERE id = ?")
            .bind(&priority.name)
            .bind(priority.position)
            .bind(priority.id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        tx.commit().await?;

        Ok(Some(priority.clone()))
    }

    async fn try_delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM priorities WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

fn priority_from_row(row: &SqliteRow) -> Result<Priority, sqlx::Error> {
    Ok(Priority {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        position: row.try_get("position")?,
    })
}

// =============================================================================
// Tests
// =============================================================================
