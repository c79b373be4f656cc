//! Profile editing.

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::api::dto::forms::UserEditForm;
use crate::api::dto::views::{UserEditPage, UserView};
use crate::api::middleware::auth::SessionUser;
use crate::domain::{User, time};
use crate::infrastructure::{AppDependencies, SessionId};

/// Flags carried back to the profile page after a redirect.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UserEditPageQuery {
    #[serde(default)]
    password: bool,
}

/// GET /userEdit - Profile page with the timezone selector.
///
/// `?password=true` reports a rejected update, typically a wrong current
/// password.
#[allow(clippy::unused_async)]
pub async fn user_edit_page(
    user: SessionUser,
    Query(query): Query<UserEditPageQuery>,
) -> Json<UserEditPage> {
    let error_message = query
        .password
        .then(|| "The old password was entered incorrectly.".to_string());

    Json(edit_page(user.user(), error_message, Vec::new()))
}

/// POST /userEdit - Update the profile.
///
/// The submitted profile must validate and `old_password` must match the
/// current password; the session is refreshed so later requests see the
/// edited account. Failures redirect to `?password=true`, success to the
/// task list.
pub async fn update_profile(
    State(dependencies): State<AppDependencies>,
    user: SessionUser,
    session_id: SessionId,
    Form(form): Form<UserEditForm>,
) -> Response {
    let validation_errors = form.validation_errors();
    if !validation_errors.is_empty() {
        return Json(edit_page(user.user(), None, validation_errors)).into_response();
    }

    if form.old_password != user.user().password {
        return Redirect::to("/userEdit?password=true").into_response();
    }

    let edited = form.into_user(user.user().id);
    match dependencies.users().update(&edited).await {
        Ok(updated) => {
            dependencies.sessions().refresh(session_id, updated).await;
            Redirect::to("/tasks").into_response()
        }
        Err(_) => Redirect::to("/userEdit?password=true").into_response(),
    }
}

fn edit_page(user: &User, error_message: Option<String>, validation_errors: Vec<String>) -> UserEditPage {
    UserEditPage {
        user: UserView::from(user),
        zones: time::available_zones(),
        error_message,
        validation_errors,
    }
}
