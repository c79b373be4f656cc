//! Task pages and actions.
//!
//! Mutations arrive as form posts or plain links and answer with redirects,
//! so the client always lands back on a page view. Task timestamps in every
//! page are rendered in the viewing user's timezone.

use axum::Json;
use axum::extract::{Form, Path, State};
use axum::response::Redirect;

use crate::api::dto::forms::TaskForm;
use crate::api::dto::views::{
    CategoryView, PriorityView, TaskDetailsPage, TaskFormPage, TaskListPage, TaskView, UserView,
};
use crate::api::middleware::auth::SessionUser;
use crate::domain::{Task, TodoError, User};
use crate::infrastructure::AppDependencies;

/// GET /tasks - All tasks.
pub async fn list_all(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
) -> Json<TaskListPage> {
    let tasks = dependencies.tasks().find_all().await;
    Json(task_list_page(&tasks, user.user()))
}

/// GET /newTasks - Tasks still open.
pub async fn list_new(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
) -> Json<TaskListPage> {
    let tasks = dependencies.tasks().find_new().await;
    Json(task_list_page(&tasks, user.user()))
}

/// GET /doneTasks - Completed tasks.
pub async fn list_done(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
) -> Json<TaskListPage> {
    let tasks = dependencies.tasks().find_done().await;
    Json(task_list_page(&tasks, user.user()))
}

/// GET /taskDetails/{id} - Single task.
///
/// # Errors
///
/// `404` when no task has the given id.
pub async fn task_details(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<TaskDetailsPage>, TodoError> {
    let task = dependencies.tasks().find_by_id(id).await?;
    Ok(Json(task_details_page(&task, user.user())))
}

/// GET /taskDone/{id} - Mark a task completed.
///
/// Answers with the details page of the freshly completed task.
///
/// # Errors
///
/// `404` when no task has the given id.
pub async fn task_done(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<TaskDetailsPage>, TodoError> {
    let task = dependencies.tasks().mark_done(id).await?;
    Ok(Json(task_details_page(&task, user.user())))
}

/// GET /addTask - Blank task form.
pub async fn new_task_form(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
) -> Json<TaskFormPage> {
    Json(task_form_page(&dependencies, user.user(), None).await)
}

/// GET /editTask/{id} - Task form prefilled for editing.
///
/// # Errors
///
/// `404` when no task has the given id.
pub async fn edit_task_form(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
    Path(id): Path<i64>,
) -> Result<Json<TaskFormPage>, TodoError> {
    let task = dependencies.tasks().find_by_id(id).await?;
    Ok(Json(task_form_page(&dependencies, user.user(), Some(&task)).await))
}

/// POST /addOrUpdateTask - Save the task form.
///
/// A form with id zero creates a task, any other id rewrites the stored one.
/// The saved task is owned by the logged-in user. Success redirects to the
/// task list.
///
/// # Errors
///
/// `404` when the priority name or the edited task id is unknown, `400` when
/// the task could not be stored.
pub async fn save_task(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
    Form(form): Form<TaskForm>,
) -> Result<Redirect, TodoError> {
    let categories = dependencies
        .categories()
        .find_by_ids(&form.parsed_category_ids())
        .await;
    let task = form.into_task(user.into_user(), categories);
    dependencies.tasks().add_or_update(&task).await?;
    Ok(Redirect::to("/tasks"))
}

/// GET /deleteTask/{id} - Delete a task.
///
/// Deleting an unknown id is a no-op; either way the client is redirected to
/// the task list.
pub async fn delete_task(
    State(dependencies): State<AppDependencies>,
    Path(id): Path<i64>,
) -> Redirect {
    dependencies.tasks().delete_by_id(id).await;
    Redirect::to("/tasks")
}

fn task_list_page(tasks: &[Task], viewer: &User) -> TaskListPage {
    TaskListPage {
        user: UserView::from(viewer),
        tasks: tasks
            .iter()
            .map(|task| TaskView::for_viewer(task, viewer))
            .collect(),
    }
}

fn task_details_page(task: &Task, viewer: &User) -> TaskDetailsPage {
    TaskDetailsPage {
        user: UserView::from(viewer),
        task: TaskView::for_viewer(task, viewer),
    }
}

async fn task_form_page(
    dependencies: &AppDependencies,
    viewer: &User,
    task: Option<&Task>,
) -> TaskFormPage {
    TaskFormPage {
        user: UserView::from(viewer),
        task: task.map(|task| TaskView::for_viewer(task, viewer)),
        categories: dependencies
            .categories()
            .find_all()
            .await
            .iter()
            .map(CategoryView::from)
            .collect(),
        priorities: dependencies
            .priorities()
            .find_all()
            .await
            .iter()
            .map(PriorityView::from)
            .collect(),
    }
}
