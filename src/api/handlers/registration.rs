//! Account registration.

use axum::Json;
use axum::extract::{Form, Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use serde::Deserialize;

use crate::api::dto::forms::RegistrationForm;
use crate::api::dto::views::{RegistrationPage, UserView};
use crate::api::middleware::auth::SessionUser;
use crate::infrastructure::AppDependencies;

/// Flags carried back to the registration page after a redirect.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RegistrationPageQuery {
    #[serde(default)]
    password: bool,
    #[serde(default)]
    account: bool,
}

/// GET /registration - Registration page.
///
/// `?password=true` reports a password repetition mismatch, `?account=true`
/// reports a taken login.
#[allow(clippy::unused_async)]
pub async fn registration_page(
    user: Option<SessionUser>,
    Query(query): Query<RegistrationPageQuery>,
) -> Json<RegistrationPage> {
    let error_message = if query.password {
        Some("Passwords must match.".to_string())
    } else if query.account {
        Some("A user with this login already exists.".to_string())
    } else {
        None
    };

    Json(RegistrationPage {
        user: user.map(|session_user| UserView::from(session_user.user())),
        error_message,
        validation_errors: Vec::new(),
    })
}

/// POST /registration - Create an account.
///
/// An ill-formed profile re-renders the page with the field problems listed.
/// A password repetition mismatch redirects to `?password=true` and a taken
/// login to `?account=true`; success redirects to the login page.
pub async fn registration_submit(
    State(dependencies): State<AppDependencies>,
    user: Option<SessionUser>,
    Form(form): Form<RegistrationForm>,
) -> Response {
    let validation_errors = form.validation_errors();
    if !validation_errors.is_empty() {
        let page = RegistrationPage {
            user: user.map(|session_user| UserView::from(session_user.user())),
            error_message: None,
            validation_errors,
        };
        return Json(page).into_response();
    }

    if !form.passwords_match() {
        return Redirect::to("/registration?password=true").into_response();
    }

    match dependencies.users().add(&form.into_user()).await {
        Ok(_) => Redirect::to("/login").into_response(),
        Err(_) => Redirect::to("/registration?account=true").into_response(),
    }
}
