//! Route configuration.
//!
//! Every route sits behind the session filter; only `/`, `/login`, and
//! `/registration` are reachable without a session.
//!
//! # Routes
//!
//! | Method | Path | Handler | Description |
//! |--------|------|---------|-------------|
//! | GET | / | `root_redirect` | Redirect to the task list |
//! | GET | /tasks | `list_all` | All tasks |
//! | GET | /newTasks | `list_new` | Open tasks |
//! | GET | /doneTasks | `list_done` | Completed tasks |
//! | GET | /taskDetails/{id} | `task_details` | Single task |
//! | GET | /taskDone/{id} | `task_done` | Mark a task completed |
//! | GET | /addTask | `new_task_form` | Blank task form |
//! | GET | /editTask/{id} | `edit_task_form` | Prefilled task form |
//! | POST | /addOrUpdateTask | `save_task` | Save the task form |
//! | GET | /deleteTask/{id} | `delete_task` | Delete a task |
//! | GET | /login | `login_page` | Login page |
//! | POST | /login | `login_submit` | Authenticate |
//! | GET | /logout | `logout` | Close the session |
//! | GET | /registration | `registration_page` | Registration page |
//! | POST | /registration | `registration_submit` | Create an account |
//! | GET | /userEdit | `user_edit_page` | Profile page |
//! | POST | /userEdit | `update_profile` | Update the profile |

use std::sync::Arc;

use axum::Router;
use axum::response::Redirect;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

use crate::api::handlers::login::{login_page, login_submit, logout};
use crate::api::handlers::profile::{update_profile, user_edit_page};
use crate::api::handlers::registration::{registration_page, registration_submit};
use crate::api::handlers::tasks::{
    delete_task, edit_task_form, list_all, list_done, list_new, new_task_form, save_task,
    task_details, task_done,
};
use crate::api::middleware::auth::AuthLayer;
use crate::infrastructure::AppDependencies;

/// GET / - Landing redirect to the task list.
#[allow(clippy::unused_async)]
pub async fn root_redirect() -> Redirect {
    Redirect::to("/tasks")
}

/// Creates the Axum router with all routes, the session filter, and request
/// tracing.
pub fn create_router(dependencies: AppDependencies) -> Router {
    let sessions = Arc::clone(dependencies.sessions());

    Router::new()
        // Task routes
        .route("/tasks", get(list_all))
        .route("/newTasks", get(list_new))
        .route("/doneTasks", get(list_done))
        .route("/taskDetails/{id}", get(task_details))
        .route("/taskDone/{id}", get(task_done))
        .route("/addTask", get(new_task_form))
        .route("/editTask/{id}", get(edit_task_form))
        .route("/addOrUpdateTask", post(save_task))
        .route("/deleteTask/{id}", get(delete_task))
        // Account routes
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", get(logout))
        .route(
            "/registration",
            get(registration_page).post(registration_submit),
        )
        .route("/userEdit", get(user_edit_page).post(update_profile))
        // Landing
        .route("/", get(root_redirect))
        // Session filter runs inside tracing
        .layer(AuthLayer::new(sessions))
        .layer(TraceLayer::new_for_http())
        .with_state(dependencies)
}

// =============================================================================
// Tests
// =============================================================================
