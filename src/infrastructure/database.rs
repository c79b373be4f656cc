//! SQLite pool construction, schema bootstrap, and reference data.
//!
//! The schema is created at startup if absent, so a fresh checkout runs
//! without a migration step. Priorities and starter categories are seeded
//! idempotently; user rows and tasks are only ever created through the
//! repositories.

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

const SCHEMA: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS todo_users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        login TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        timezone TEXT
    )",
    "CREATE TABLE IF NOT EXISTS priorities (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        position INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    )",
    "CREATE TABLE IF NOT EXISTS tasks (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        created TEXT NOT NULL,
        done INTEGER NOT NULL DEFAULT 0,
        user_id INTEGER NOT NULL REFERENCES todo_users (id),
        priority_id INTEGER NOT NULL REFERENCES priorities (id)
    )",
    "CREATE TABLE IF NOT EXISTS tasks_categories (
        task_id INTEGER NOT NULL REFERENCES tasks (id),
        category_id INTEGER NOT NULL REFERENCES categories (id),
        PRIMARY KEY (task_id, category_id)
    )",
];

const PRIORITY_SEED: [(&str, i64); 3] = [("urgently", 1), ("normal", 2), ("low", 3)];

const CATEGORY_SEED: [&str; 5] = ["work", "home", "family", "sport", "study"];

/// Opens a connection pool for the given SQLite URL.
///
/// Missing database files are created. Foreign key enforcement is switched on
/// for every connection; the join table and task ownership rely on it.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL cannot be parsed or the pool cannot
/// connect.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true)
        .foreign_keys(true);

    // An in-memory database exists per connection; a second connection would
    // see an empty schema.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

/// Creates all tables if they do not exist yet.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn initialize_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// Seeds priorities and starter categories. Safe to run on every startup.
///
/// # Errors
///
/// Returns `sqlx::Error` if an insert fails.
pub async fn seed_reference_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for (name, position) in PRIORITY_SEED {
        sqlx::query("INSERT INTO priorities (name, position) VALUES (?, ?) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .bind(position)
            .execute(pool)
            .await?;
    }
    for name in CATEGORY_SEED {
        sqlx::query("INSERT INTO categories (name) VALUES (?) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .execute(pool)
            .await?;
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sqlx::Row;

    async fn create_test_pool() -> SqlitePool {
        let pool = connect("sqlite::memory:").await.unwrap();
        initialize_schema(&pool).await.unwrap();
        pool
    }

    #[rstest]
    #[tokio::test]
    async fn schema_initialization_is_idempotent() {
        let pool = create_test_pool().await;

        initialize_schema(&pool).await.unwrap();
    }

    #[rstest]
    #[tokio::test]
    async fn seed_creates_ordered_priorities() {
        let pool = create_test_pool().await;
        seed_reference_data(&pool).await.unwrap();

        let rows = sqlx::query("SELECT name, position FROM priorities ORDER BY position")
            .fetch_all(&pool)
            .await
            .unwrap();
        let seeded: Vec<(String, i64)> = rows
            .iter()
            .map(|row| (row.get::<String, _>("name"), row.get::<i64, _>("position")))
            .collect();

        assert_eq!(
            seeded,
            vec![
                ("urgently".to_string(), 1),
                ("normal".to_string(), 2),
                ("low".to_string(), 3),
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn seed_creates_starter_categories() {
        let pool = create_test_pool().await;
        seed_reference_data(&pool).await.unwrap();

        let rows = sqlx::query("SELECT name FROM categories ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
        let names: Vec<String> = rows
            .iter()
            .map(|row| row.get::<String, _>("name"))
            .collect();

        assert_eq!(names, vec!["work", "home", "family", "sport", "study"]);
    }

    #[rstest]
    #[tokio::test]
    async fn seeding_twice_does_not_duplicate() {
        let pool = create_test_pool().await;
        seed_reference_data(&pool).await.unwrap();
        seed_reference_data(&pool).await.unwrap();

        let row = sqlx::query("SELECT COUNT(*) AS total FROM priorities")
            .fetch_one(&pool)
            .await
            .unwrap();

        assert_eq!(row.get::<i64, _>("total"), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let pool = create_test_pool().await;
        seed_reference_data(&pool).await.unwrap();

        let result = sqlx::query(
            "INSERT INTO tasks (name, description, created, done, user_id, priority_id)
             VALUES ('t', 'd', '2024-01-15T12:00:00Z', 0, 999, 1)",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err());
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_login_is_rejected_by_schema() {
        let pool = create_test_pool().await;

        sqlx::query("INSERT INTO todo_users (name, login, password) VALUES ('Margaret', 'margaret', 'secret')")
            .execute(&pool)
            .await
            .unwrap();
        let duplicate = sqlx::query(
            "INSERT INTO todo_users (name, login, password) VALUES ('Other', 'margaret', 'secret')",
        )
        .execute(&pool)
        .await;

        assert!(duplicate.is_err());
    }
}
