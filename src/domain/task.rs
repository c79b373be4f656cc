//! Task entity.

use chrono::{DateTime, Utc};

use crate::domain::category::Category;
use crate::domain::priority::Priority;
use crate::domain::user::User;

// =============================================================================
// Task
// =============================================================================

/// A to-do item owned by a user.
///
/// `id == 0` marks a task that has not been persisted yet; the store assigns
/// the real id on insert. `created` is always UTC and is converted to the
/// viewer's zone only at display time. The attached `priority` may be an
/// unresolved placeholder (see [`Priority::named`]) until the task service
/// resolves it by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub done: bool,
    pub user: User,
    pub priority: Priority,
    pub categories: Vec<Category>,
}

impl Task {
    /// Creates an unpersisted task stamped with the current time.
    #[must_use]
    pub fn new(
        name: String,
        description: String,
        user: User,
        priority: Priority,
        categories: Vec<Category>,
    ) -> Self {
        Self {
            id: 0,
            name,
            description,
            created: Utc::now(),
            done: false,
            user,
            priority,
            categories,
        }
    }

    /// Marks the task as completed.
    pub const fn mark_done(&mut self) {
        self.done = true;
    }

    /// Whether the task has been persisted (a stored row backs it).
    #[must_use]
    pub const fn is_persisted(&self) -> bool {
        self.id != 0
    }
}

// =============================================================================
// Tests
// =============================================================================
