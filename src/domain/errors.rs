//! Typed failures returned by the service layer.

use thiserror::Error;

// =============================================================================
// TodoError
// =============================================================================

/// The failure taxonomy for service operations.
///
/// Repository failures never escape the data-access boundary; services
/// translate empty repository results into one of these variants:
///
/// - [`TodoError::NotFound`]: a lookup or an update targeted a missing row
/// - [`TodoError::InvalidArgument`]: a write was rejected (duplicate login,
///   unresolved priority)
/// - [`TodoError::InvalidCredential`]: a login attempt with a wrong password
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("{entity} with identifier '{identifier}' not found")]
    NotFound { entity: String, identifier: String },

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Invalid login or password")]
    InvalidCredential,
}

// =============================================================================
// Factory Methods
// =============================================================================

impl TodoError {
    #[must_use]
    pub fn not_found(entity: impl Into<String>, identifier: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            identifier: identifier.to_string(),
        }
    }

    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn invalid_credential() -> Self {
        Self::InvalidCredential
    }
}

// =============================================================================
// Query Methods
// =============================================================================

impl TodoError {
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }

    #[must_use]
    pub const fn is_invalid_credential(&self) -> bool {
        matches!(self, Self::InvalidCredential)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    mod factory_methods {
        use super::*;

        #[rstest]
        fn not_found_creates_error() {
            let error = TodoError::not_found("Task", "17");
            match error {
                TodoError::NotFound { entity, identifier } => {
                    assert_eq!(entity, "Task");
                    assert_eq!(identifier, "17");
                }
                _ => panic!("Expected NotFound variant"),
            }
        }

        #[rstest]
        fn invalid_argument_creates_error() {
            let error = TodoError::invalid_argument("login already taken");
            match error {
                TodoError::InvalidArgument { reason } => {
                    assert_eq!(reason, "login already taken");
                }
                _ => panic!("Expected InvalidArgument variant"),
            }
        }

        #[rstest]
        fn invalid_credential_creates_error() {
            let error = TodoError::invalid_credential();
            assert_eq!(error, TodoError::InvalidCredential);
        }
    }

    mod query_methods {
        use super::*;

        #[rstest]
        fn not_found_predicates() {
            let error = TodoError::not_found("User", "margaret");

            assert!(error.is_not_found());
            assert!(!error.is_invalid_argument());
            assert!(!error.is_invalid_credential());
        }

        #[rstest]
        fn invalid_argument_predicates() {
            let error = TodoError::invalid_argument("bad");

            assert!(error.is_invalid_argument());
            assert!(!error.is_not_found());
        }

        #[rstest]
        fn invalid_credential_predicates() {
            let error = TodoError::invalid_credential();

            assert!(error.is_invalid_credential());
            assert!(!error.is_not_found());
        }
    }

    mod display {
        use super::*;

        #[rstest]
        fn not_found_display() {
            let error = TodoError::not_found("Task", "17");
            assert_eq!(error.to_string(), "Task with identifier '17' not found");
        }

        #[rstest]
        fn invalid_argument_display() {
            let error = TodoError::invalid_argument("priority 'severe' does not exist");
            assert_eq!(
                error.to_string(),
                "Invalid argument: priority 'severe' does not exist"
            );
        }

        #[rstest]
        fn invalid_credential_display() {
            let error = TodoError::invalid_credential();
            assert_eq!(error.to_string(), "Invalid login or password");
        }
    }
}
