//! SQLite-backed user storage.
//!
//! Every operation runs in its own transaction and never surfaces a raw store
//! error: failures are logged and reported as an empty outcome, which the
//! service layer translates into a typed error. A duplicate login shows up as
//! a failed add, distinguishable only in the log line.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::domain::User;

// =============================================================================
// UserRepository
// =============================================================================

#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All users ordered by id.
    pub async fn find_all(&self) -> Vec<User> {
        match self.try_find_all().await {
            Ok(users) => users,
            Err(error) => {
                tracing::error!("Failed to list users: {error}");
                Vec::new()
            }
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Option<User> {
        match self.try_find_by_id(id).await {
            Ok(found) => found,
            Err(error) => {
                tracing::error!("Failed to find user by id {id}: {error}");
                None
            }
        }
    }

    pub async fn find_by_login(&self, login: &str) -> Option<User> {
        match self.try_find_by_login(login).await {
            Ok(found) => found,
            Err(error) => {
                tracing::error!("Failed to find user by login '{login}': {error}");
                None
            }
        }
    }

    /// Inserts the user and returns it with the generated id, or `None` when
    /// the insert was rejected (typically a taken login).
    pub async fn add(&self, user: &User) -> Option<User> {
        match self.try_add(user).await {
            Ok(persisted) => Some(persisted),
            Err(error) => {
                let unique_violation = error
                    .as_database_error()
                    .is_some_and(|database_error| database_error.is_unique_violation());
                if unique_violation {
                    tracing::error!("Failed to add user, login '{}' is taken: {error}", user.login);
                } else {
                    tracing::error!("Failed to add user '{}': {error}", user.login);
                }
                None
            }
        }
    }

    /// Rewrites the stored row, returning `None` when no row was persisted.
    pub async fn update(&self, user: &User) -> Option<User> {
        match self.try_update(user).await {
            Ok(updated) => updated,
            Err(error) => {
                tracing::error!("Failed to update user {}: {error}", user.id);
                None
            }
        }
    }

    /// Deletes the row if it exists; deleting an absent id is a no-op.
    pub async fn delete_by_id(&self, id: i64) {
        if let Err(error) = self.try_delete_by_id(id).await {
            tracing::error!("Failed to delete user {id}: {error}");
        }
    }

    async fn try_find_all(&self) -> Result<Vec<User>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let rows = sqlx::query(
            "SELECT id, name, login, password, timezone FROM todo_users ORDER BY id",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;

        rows.iter().map(user_from_row).collect()
    }

    async fn try_find_by_id(&self, id: i64) -> Result<Option<User>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            "SELECT id, name, login, password, timezone FROM todo_users WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn try_find_by_login(&self, login: &str) -> Result<Option<User>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            "SELECT id, name, login, password, timezone FROM todo_users WHERE login = ?",
        )
        .bind(login)
        .fetch_optional(&mut *tx)
        .await?;
        tx.commit().await?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn try_add(&self, user: &User) -> Result<User, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO todo_users (name, login, password, timezone) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.name)
        .bind(&user.login)
        .bind(&user.password)
        .bind(&user.timezone)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;

        let mut persisted = user.clone();
        persisted.id = result.last_insert_rowid();
        Ok(persisted)
    }

    async fn try_update(&self, user: &User) -> Result<Option<User>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "UPDATE todo_users SET name = ?, login = ?, password = ?, timezone = ? WHERE id = ?",
        )
        .bind(&user.name)
        .bind(&user.login)
        .bind(&user.password)
        .bind(&user.timezone)
        .bind(user.id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        tx.commit().await?;

        Ok(Some(user.clone()))
    }

    async fn try_delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM todo_users WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

fn user_from_row(row: &SqliteRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        login: row.try_get("login")?,
        password: row.try_get("password")?,
        timezone: row.try_get("timezone")?,
    })
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database;
    use rstest::rstest;

    async fn create_test_repository() -> UserRepository {
        let pool = database::connect("sqlite::memory:").await.unwrap();
        database::initialize_schema(&pool).await.unwrap();
        UserRepository::new(pool)
    }

    fn create_test_user(login: &str) -> User {
        User::new(
            "Margaret".to_string(),
            login.to_string(),
            "secret".to_string(),
            None,
        )
    }

    #[rstest]
    #[tokio::test]
    async fn add_assigns_generated_id() {
        let repository = create_test_repository().await;

        let persisted = repository.add(&create_test_user("margaret")).await.unwrap();

        assert!(persisted.id > 0);
        assert_eq!(persisted.login, "margaret");
    }

    #[rstest]
    #[tokio::test]
    async fn add_with_taken_login_returns_none() {
        let repository = create_test_repository().await;
        repository.add(&create_test_user("margaret")).await.unwrap();

        let duplicate = repository.add(&create_test_user("margaret")).await;

        assert!(duplicate.is_none());
        assert_eq!(repository.find_all().await.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_returns_stored_user() {
        let repository = create_test_repository().await;
        let persisted = repository.add(&create_test_user("margaret")).await.unwrap();

        let found = repository.find_by_id(persisted.id).await;

        assert_eq!(found, Some(persisted));
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_id_unknown_returns_none() {
        let repository = create_test_repository().await;

        assert!(repository.find_by_id(404).await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_login_returns_stored_user() {
        let repository = create_test_repository().await;
        repository.add(&create_test_user("margaret")).await.unwrap();

        let found = repository.find_by_login("margaret").await;

        assert_eq!(found.map(|user| user.login), Some("margaret".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn find_by_login_unknown_returns_none() {
        let repository = create_test_repository().await;

        assert!(repository.find_by_login("nobody").await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn update_rewrites_stored_fields() {
        let repository = create_test_repository().await;
        let mut persisted = repository.add(&create_test_user("margaret")).await.unwrap();
        persisted.name = "Margaret Hamilton".to_string();
        persisted.timezone = Some("Asia/Tokyo".to_string());

        let updated = repository.update(&persisted).await;

        assert!(updated.is_some());
        let reloaded = repository.find_by_id(persisted.id).await.unwrap();
        assert_eq!(reloaded.name, "Margaret Hamilton");
        assert_eq!(reloaded.timezone, Some("Asia/Tokyo".to_string()));
    }

    #[rstest]
    #[tokio::test]
    async fn update_missing_row_returns_none() {
        let repository = create_test_repository().await;
        let mut ghost = create_test_user("ghost");
        ghost.id = 404;

        assert!(repository.update(&ghost).await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_removes_row() {
        let repository = create_test_repository().await;
        let persisted = repository.add(&create_test_user("margaret")).await.unwrap();

        repository.delete_by_id(persisted.id).await;

        assert!(repository.find_by_id(persisted.id).await.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn delete_unknown_is_noop() {
        let repository = create_test_repository().await;
        repository.add(&create_test_user("margaret")).await.unwrap();

        repository.delete_by_id(404).await;

        assert_eq!(repository.find_all().await.len(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn find_all_is_ordered_by_id() {
        let repository = create_test_repository().await;
        repository.add(&create_test_user("margaret")).await.unwrap();
        repository.add(&create_test_user("grace")).await.unwrap();
        repository.add(&create_test_user("ada")).await.unwrap();

        let users = repository.find_all().await;
        let ids: Vec<i64> = users.iter().map(|user| user.id).collect();

        assert_eq!(users.len(), 3);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
