//! SQLite-backed task storage.
//!
//! Tasks are loaded together with their owner, priority, and ordered category
//! list. Every operation runs in its own transaction; failures are logged and
//! reported as an empty outcome.

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, Sqlite, SqlitePool, Transaction};

use crate::domain::{Category, Priority, Task, User};

const SELECT_TASKS: &str = "\
    SELECT t.id, t.name, t.description, t.created, t.done, \
           u.id AS user_id, u.name AS user_name, u.login AS user_login, \
           u.password AS user_password, u.timezone AS user_timezone, \
           p.id AS priority_id, p.name AS priority_name, p.position AS priority_position \
    FROM tasks t \
    JOIN todo_users u ON u.id = t.user_id \
    JOIN priorities p ON p.id = t.priority_id";

// =============================================================================
// TaskRepository
// =============================================================================

#[derive(Clone)]
pub struct TaskRepository {
    pool: SqlitePool,
}

impl TaskRepository {
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All tasks ordered by id.
    pub async fn find_all(&self) -> Vec<Task> {
        self.find_where("").await
    }

    /// Tasks not yet completed, ordered by id.
    pub async fn find_new(&self) -> Vec<Task> {
        self.find_where("WHERE t.done = 0").await
    }

    /// Completed tasks ordered by id.
    pub async fn find_done(&self) -> Vec<Task> {
        self.find_where("WHERE t.done = 1").await
    }

    pub async fn find_by_id(&self, id: i64) -> Option<Task> {
        match self.try_find_by_id(id).await {
            Ok(found) => found,
            Err(error) => {
                tracing::error!("Failed to find task by id {id}: {error}");
                None
            }
        }
    }

    /// Inserts the task with its category links and returns it with the
    /// generated id. The owner, priority, and categories must already be
    /// persisted, otherwise the insert is rejected.
    pub async fn add(&self, task: &Task) -> Option<Task> {
        match self.try_add(task).await {
            Ok(persisted) => Some(persisted),
            Err(error) => {
                tracing::error!("Failed to add task '{}': {error}", task.name);
                None
            }
        }
    }

    /// Rewrites the stored row and replaces its category links, returning
    /// `None` when no row was persisted. The creation timestamp is kept as
    /// written by `add`.
    pub async fn update(&self, task: &Task) -> Option<Task> {
        match self.try_update(task).await {
            Ok(updated) => updated,
            Err(error) => {
                tracing::error!("Failed to update task {}: {error}", task.id);
                None
            }
        }
    }

    /// Deletes the row and its category links; deleting an absent id is a
    /// no-op.
    pub async fn delete_by_id(&self, id: i64) {
        if let Err(error) = self.try_delete_by_id(id).await {
            tracing::error!("Failed to delete task {id}: {error}");
        }
    }

    async fn find_where(&self, filter: &str) -> Vec<Task> {
        match self.try_find_where(filter).await {
            Ok(tasks) => tasks,
            Err(error) => {
                tracing::error!("Failed to list tasks: {error}");
                Vec::new()
            }
        }
    }

    async fn try_find_where(&self, filter: &str) -> Result<Vec<Task>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let statement = format!("{SELECT_TASKS} {filter} ORDER BY t.id");
        let rows = sqlx::query(&statement).fetch_all(&mut *tx).await?;

        let mut tasks = Vec::with_capacity(rows.len());
        for row in &rows {
            let mut task = task_from_row(row)?;
            task.categories = load_categories(&mut tx, task.id).await?;
            tasks.push(task);
        }
        tx.commit().await?;

        Ok(tasks)
    }

    async fn try_find_by_id(&self, id: i64) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let statement = format!("{SELECT_TASKS} WHERE t.id = ?");
        let row = sqlx::query(&statement)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        let task = match row {
            Some(row) => {
                let mut task = task_from_row(&row)?;
                task.categories = load_categories(&mut tx, task.id).await?;
                Some(task)
            }
            None => None,
        };
        tx.commit().await?;

        Ok(task)
    }

    async fn try_add(&self, task: &Task) -> Result<Task, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        let result = sqlx::query(
            "INSERT INTO tasks (name, description, created, done, user_id, priority_id) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.created)
        .bind(task.done)
        .bind(task.user.id)
        .bind(task.priority.id)
        .execute(&mut *tx)
        .await?;
        let task_id = result.last_insert_rowid();
        insert_category_links(&mut tx, task_id, &task.categories).await?;
        tx.commit().await?;

        let mut persisted = task.clone();
        persisted.id = task_id;
        Ok(persisted)
    }

    async fn try_update(&self, task: &Task) -> Result<Option<Task>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        // created is immutable after insert, so it stays out of the SET list.
        let result = sqlx::query(
            "UPDATE tasks SET name = ?, description = ?, done = ?, user_id = ?, priority_id = ? \
             WHERE id = ?",
        )
        .bind(&task.name)
        .bind(&task.description)
        .bind(task.done)
        .bind(task.user.id)
        .bind(task.priority.id)
        .bind(task.id)
        .execute(&mut *tx)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        sqlx::query("DELETE FROM tasks_categories WHERE task_id = ?")
            .bind(task.id)
            .execute(&mut *tx)
            .await?;
        insert_category_links(&mut tx, task.id, &task.categories).await?;
        tx.commit().await?;

        Ok(Some(task.clone()))
    }

    async fn try_delete_by_id(&self, id: i64) -> Result<(), sqlx::Error> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM tasks_categories WHERE task_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }
}

async fn load_categories(
    tx: &mut Transaction<'_, Sqlite>,
    task_id: i64,
) -> Result<Vec<Category>, sqlx::Error> {
    let rows = sqlx::query(
        "SELECT c.id, c.name FROM categories c \
         JOIN tasks_categories tc ON tc.category_id = c.id \
         WHERE tc.task_id = ? ORDER BY c.id",
    )
    .bind(task_id)
    .fetch_all(&mut **tx)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(Category {
                id: row.try_get("id")?,
                name: row.try_get("name")?,
            })
        })
        .collect()
}

async fn insert_category_links(
    tx: &mut Transaction<'_, Sqlite>,
    task_id: i64,
    categories: &[Category],
) -> Result<(), sqlx::Error> {
    for category in categories {
        sqlx::query("INSERT INTO tasks_categories (task_id, category_id) VALUES (?, ?)")
            .bind(task_id)
            .bind(category.id)
            .execute(&mut **tx)
            .await?;
    }
    Ok(())
}

fn task_from_row(row: &SqliteRow) -> Result<Task, sqlx::Error> {
    Ok(Task {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        created: row.try_get("created")?,
        done: row.try_get("done")?,
        user: User {
            id: row.try_get("user_id")?,
            name: row.try_get("user_name")?,
            login: row.try_get("user_login")?,
            password: row.try_get("user_password")?,
            timezone: row.try_get("user_timezone")?,
        },
        priority: Priority {
            id: row.try_get("priority_id")?,
            name: row.try_get("priority_name")?,
            position: row.try_get("priority_position")?,
        },
        categories: Vec::new(),
    })
}

// =============================================================================
// Tests
// =============================================================================
