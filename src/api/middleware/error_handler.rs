//! HTTP mapping for domain errors.
//!
//! [`TodoError`] stays free of HTTP concerns; this module gives it a status
//! code and a JSON body so handlers can bubble it with `?`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::TodoError;

// =============================================================================
// ErrorBody
// =============================================================================

/// JSON body returned for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

/// Maps a domain error onto a status code and response body.
#[must_use]
pub fn error_response(error: &TodoError) -> (StatusCode, ErrorBody) {
    let (status, code) = match error {
        TodoError::NotFound { entity, .. } => (
            StatusCode::NOT_FOUND,
            format!("{}_NOT_FOUND", entity.to_uppercase()),
        ),
        TodoError::InvalidArgument { .. } => {
            (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT".to_string())
        }
        TodoError::InvalidCredential => {
            (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIAL".to_string())
        }
    };

    (
        status,
        ErrorBody {
            code,
            message: error.to_string(),
        },
    )
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        let (status, body) = error_response(&self);
        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_maps_to_404_with_entity_code() {
        let error = TodoError::not_found("task", 42);

        let (status, body) = error_response(&error);

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "TASK_NOT_FOUND");
        assert_eq!(body.message, "task with identifier '42' not found");
    }

    #[rstest]
    fn invalid_argument_maps_to_400() {
        let error = TodoError::invalid_argument("login is taken");

        let (status, body) = error_response(&error);

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "INVALID_ARGUMENT");
    }

    #[rstest]
    fn invalid_credential_maps_to_401() {
        let (status, body) = error_response(&TodoError::InvalidCredential);

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.code, "INVALID_CREDENTIAL");
        assert_eq!(body.message, "Invalid login or password");
    }

    #[rstest]
    fn into_response_keeps_the_status() {
        let response = TodoError::not_found("user", "margaret").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    fn error_body_serializes_to_flat_json() {
        let (_, body) = error_response(&TodoError::InvalidCredential);

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "code": "INVALID_CREDENTIAL",
                "message": "Invalid login or password",
            })
        );
    }
}
