//! JSON view models returned by the handlers.
//!
//! Views are the only shapes that leave the server. [`UserView`] carries no
//! password, and task timestamps are rendered in the viewing user's timezone
//! rather than as raw UTC instants.

use serde::Serialize;

use crate::domain::{Category, Priority, Task, User, time};

// =============================================================================
// Entity views
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserView {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub timezone: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            login: user.login.clone(),
            timezone: user.timezone.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriorityView {
    pub id: i64,
    pub name: String,
    pub position: i64,
}

impl From<&Priority> for PriorityView {
    fn from(priority: &Priority) -> Self {
        Self {
            id: priority.id,
            name: priority.name.clone(),
            position: priority.position,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
}

impl From<&Category> for CategoryView {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskView {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Creation time rendered in the viewer's timezone.
    pub created: String,
    pub done: bool,
    pub user: UserView,
    pub priority: PriorityView,
    pub categories: Vec<CategoryView>,
}

impl TaskView {
    /// Renders the task for a specific viewer, converting the creation
    /// instant into the viewer's timezone.
    #[must_use]
    pub fn for_viewer(task: &Task, viewer: &User) -> Self {
        Self {
            id: task.id,
            name: task.name.clone(),
            description: task.description.clone(),
            created: time::format_in_zone(task.created, viewer.timezone.as_deref()),
            done: task.done,
            user: UserView::from(&task.user),
            priority: PriorityView::from(&task.priority),
            categories: task.categories.iter().map(CategoryView::from).collect(),
        }
    }
}

// =============================================================================
// Page views
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginPage {
    pub user: Option<UserView>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationPage {
    pub user: Option<UserView>,
    pub error_message: Option<String>,
    pub validation_errors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskListPage {
    pub user: UserView,
    pub tasks: Vec<TaskView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskDetailsPage {
    pub user: UserView,
    pub task: TaskView,
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskFormPage {
    pub user: UserView,
    /// Present when editing, absent on the blank form.
    pub task: Option<TaskView>,
    pub categories: Vec<CategoryView>,
    pub priorities: Vec<PriorityView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserEditPage {
    pub user: UserView,
    pub zones: Vec<String>,
    pub error_message: Option<String>,
    pub validation_errors: Vec<String>,
}

// =============================================================================
// Tests
// =============================================================================
