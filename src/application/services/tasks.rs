//! Task management.
//!
//! Tasks arrive from forms carrying only a priority name; the service
//! resolves the name against the priority store before anything is written.

use crate::domain::{Priority, Task, TodoError};
use crate::infrastructure::repositories::{PriorityRepository, TaskRepository};

// =============================================================================
// TaskService
// =============================================================================

#[derive(Clone)]
pub struct TaskService {
    tasks: TaskRepository,
    priorities: PriorityRepository,
}

impl TaskService {
    #[must_use]
    pub const fn new(tasks: TaskRepository, priorities: PriorityRepository) -> Self {
        Self { tasks, priorities }
    }

    pub async fn find_all(&self) -> Vec<Task> {
        self.tasks.find_all().await
    }

    pub async fn find_new(&self) -> Vec<Task> {
        self.tasks.find_new().await
    }

    pub async fn find_done(&self) -> Vec<Task> {
        self.tasks.find_done().await
    }

    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when no task has the given id.
    pub async fn find_by_id(&self, id: i64) -> Result<Task, TodoError> {
        self.tasks
            .find_by_id(id)
            .await
            .ok_or_else(|| TodoError::not_found("task", id))
    }

    /// Stores a new task under the resolved priority.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when the priority name is unknown and
    /// [`TodoError::InvalidArgument`] when the task could not be stored.
    pub async fn add(&self, task: &Task) -> Result<Task, TodoError> {
        let mut resolved = task.clone();
        resolved.priority = self.resolve_priority(&task.priority.name).await?;

        self.tasks.add(&resolved).await.ok_or_else(|| {
            TodoError::invalid_argument(format!("task '{}' could not be saved", task.name))
        })
    }

    /// Rewrites a stored task under the resolved priority.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when the priority name is unknown or
    /// the task is not persisted.
    pub async fn update(&self, task: &Task) -> Result<Task, TodoError> {
        let mut resolved = task.clone();
        resolved.priority = self.resolve_priority(&task.priority.name).await?;

        self.tasks
            .update(&resolved)
            .await
            .ok_or_else(|| TodoError::not_found("task", task.id))
    }

    /// Dispatches on persistence: an unpersisted task is added, a persisted
    /// one is updated.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`Self::add`] and [`Self::update`].
    pub async fn add_or_update(&self, task: &Task) -> Result<Task, TodoError> {
        if task.is_persisted() {
            self.update(task).await
        } else {
            self.add(task).await
        }
    }

    /// Marks the task completed and persists the change.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when no task has the given id.
    pub async fn mark_done(&self, id: i64) -> Result<Task, TodoError> {
        let mut task = self.find_by_id(id).await?;
        task.mark_done();
        self.update(&task).await
    }

    pub async fn delete_by_id(&self, id: i64) {
        self.tasks.delete_by_id(id).await;
    }

    async fn resolve_priority(&self, name: &str) -> Result<Priority, TodoError> {
        self.priorities
            .find_by_name(name)
            .await
            .ok_or_else(|| TodoError::not_found("priority", name))
    }
}

// =============================================================================
// Tests
// =============================================================================
