//! Form bodies accepted by the handlers.
//!
//! Everything arrives as `application/x-www-form-urlencoded`. Multi-valued
//! category selections are carried as a single comma-separated `category_ids`
//! field.

use serde::Deserialize;

use crate::domain::{Category, Priority, Task, User};

// =============================================================================
// LoginForm
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub login: String,
    pub password: String,
}

// =============================================================================
// RegistrationForm
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub login: String,
    pub password: String,
    pub repassword: String,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl RegistrationForm {
    /// Field-level problems with the submitted profile, empty when valid.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<String> {
        User::validate_profile(&self.name, &self.login, &self.password)
    }

    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.password == self.repassword
    }

    #[must_use]
    pub fn into_user(self) -> User {
        User::new(
            self.name,
            self.login,
            self.password,
            normalized_timezone(self.timezone),
        )
    }
}

// =============================================================================
// UserEditForm
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct UserEditForm {
    pub name: String,
    pub login: String,
    pub password: String,
    #[serde(default)]
    pub timezone: Option<String>,
    pub old_password: String,
}

impl UserEditForm {
    /// Field-level problems with the submitted profile, empty when valid.
    #[must_use]
    pub fn validation_errors(&self) -> Vec<String> {
        User::validate_profile(&self.name, &self.login, &self.password)
    }

    /// The edited user under its persisted id.
    #[must_use]
    pub fn into_user(self, id: i64) -> User {
        let mut user = User::new(
            self.name,
            self.login,
            self.password,
            normalized_timezone(self.timezone),
        );
        user.id = id;
        user
    }
}

// =============================================================================
// TaskForm
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TaskForm {
    /// Zero for a new task, the persisted id for an edit.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub done: bool,
    /// Priority name as listed on the form.
    pub priority: String,
    /// Comma-separated category ids, for example `"1,3"`.
    #[serde(default)]
    pub category_ids: String,
}

impl TaskForm {
    /// Category ids parsed from the comma-separated field. Blanks and
    /// non-numeric entries are skipped.
    #[must_use]
    pub fn parsed_category_ids(&self) -> Vec<i64> {
        self.category_ids
            .split(',')
            .filter_map(|raw| raw.trim().parse().ok())
            .collect()
    }

    /// The submitted task owned by `owner`, with its priority still
    /// unresolved.
    #[must_use]
    pub fn into_task(self, owner: User, categories: Vec<Category>) -> Task {
        let mut task = Task::new(
            self.name,
            self.description,
            owner,
            Priority::named(self.priority),
            categories,
        );
        task.id = self.id;
        task.done = self.done;
        task
    }
}

fn normalized_timezone(timezone: Option<String>) -> Option<String> {
    timezone.filter(|zone| !zone.trim().is_empty())
}

// =============================================================================
// Tests
// =============================================================================
