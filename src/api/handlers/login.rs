//! Login and logout.

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::api::dto::forms::LoginForm;
use crate::api::dto::views::{LoginPage, UserView};
use crate::api::middleware::auth::{SessionUser, expired_session_cookie, session_cookie};
use crate::infrastructure::{AppDependencies, SessionId};

/// Flags carried back to the login page after a redirect.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LoginPageQuery {
    #[serde(default)]
    error: bool,
    #[serde(default)]
    logout: bool,
}

/// GET /login - Login page.
///
/// `?error=true` reports a failed login attempt, `?logout=true` confirms a
/// completed logout.
#[allow(clippy::unused_async)]
pub async fn login_page(
    user: Option<SessionUser>,
    Query(query): Query<LoginPageQuery>,
) -> Json<LoginPage> {
    let error_message = if query.error {
        Some("Invalid login or password.".to_string())
    } else if query.logout {
        Some("You have been logged out.".to_string())
    } else {
        None
    };

    Json(LoginPage {
        user: user.map(|session_user| UserView::from(session_user.user())),
        error_message,
    })
}

/// POST /login - Authenticate and open a session.
///
/// A matching login and password pair creates a session, sets the session
/// cookie, and redirects to the task list. Anything else redirects back to
/// `/login?error=true`.
pub async fn login_submit(
    State(dependencies): State<AppDependencies>,
    Form(form): Form<LoginForm>,
) -> Response {
    match dependencies
        .users()
        .validate_login(&form.login, &form.password)
        .await
    {
        Ok(user) => {
            let session_id = dependencies.sessions().insert(user).await;
            with_set_cookie(Redirect::to("/tasks"), &session_cookie(session_id))
        }
        Err(_) => Redirect::to("/login?error=true").into_response(),
    }
}

/// GET /logout - Close the session.
///
/// Invalidates the session, clears the cookie, and redirects to
/// `/login?logout=true`.
pub async fn logout(
    State(dependencies): State<AppDependencies>,
    session_id: SessionId,
) -> Response {
    dependencies.sessions().invalidate(session_id).await;
    with_set_cookie(
        Redirect::to("/login?logout=true"),
        &expired_session_cookie(),
    )
}

fn with_set_cookie(redirect: Redirect, cookie: &str) -> Response {
    let mut response = redirect.into_response();
    if let Ok(header_value) = HeaderValue::from_str(cookie) {
        response.headers_mut().insert(header::SET_COOKIE, header_value);
    }
    response
}
