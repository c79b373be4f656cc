//! User entity.
//!
//! A registered account identified by a unique login. Passwords are stored
//! and compared as plaintext, a known limitation of the data model. Do not
//! treat this module as an example of credential handling.

use crate::domain::time;

// =============================================================================
// User
// =============================================================================

/// A registered user account.
///
/// `id` is assigned by the store on insert; a value of `0` marks an entity
/// that has not been persisted yet. `timezone` is an optional IANA zone name
/// used only for display formatting of task timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub login: String,
    pub password: String,
    pub timezone: Option<String>,
}

impl User {
    /// Creates an unpersisted user (`id == 0`).
    #[must_use]
    pub const fn new(
        name: String,
        login: String,
        password: String,
        timezone: Option<String>,
    ) -> Self {
        Self {
            id: 0,
            name,
            login,
            password,
            timezone,
        }
    }

    /// Returns the IANA zone name used to render timestamps for this user.
    ///
    /// Falls back to [`time::DEFAULT_TIMEZONE`] when the user never picked one.
    #[must_use]
    pub fn display_timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or(time::DEFAULT_TIMEZONE)
    }

    /// Validates the profile fields shared by registration and profile edit.
    ///
    /// Returns one human-readable message per violated rule, empty when the
    /// fields are acceptable:
    ///
    /// - name must be at least 5 characters
    /// - login must not be blank
    /// - password must be at least 4 characters
    #[must_use]
    pub fn validate_profile(name: &str, login: &str, password: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if name.trim().chars().count() < 5 {
            errors.push("Name must be at least 5 characters long".to_string());
        }
        if login.trim().is_empty() {
            errors.push("Login must not be blank".to_string());
        }
        if password.chars().count() < 4 {
            errors.push("Password must be at least 4 characters long".to_string());
        }

        errors
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn create_test_user() -> User {
        User::new(
            "Margaret".to_string(),
            "margaret".to_string(),
            "secret".to_string(),
            None,
        )
    }

    mod construction {
        use super::*;

        #[rstest]
        fn new_user_is_unpersisted() {
            let user = create_test_user();
            assert_eq!(user.id, 0);
        }

        #[rstest]
        fn new_keeps_fields() {
            let user = create_test_user();

            assert_eq!(user.name, "Margaret");
            assert_eq!(user.login, "margaret");
            assert_eq!(user.password, "secret");
            assert!(user.timezone.is_none());
        }
    }

    mod display_timezone {
        use super::*;

        #[rstest]
        fn defaults_when_unset() {
            let user = create_test_user();
            assert_eq!(user.display_timezone(), "Europe/London");
        }

        #[rstest]
        fn returns_chosen_zone() {
            let mut user = create_test_user();
            user.timezone = Some("Asia/Tokyo".to_string());

            assert_eq!(user.display_timezone(), "Asia/Tokyo");
        }
    }

    mod validate_profile {
        use super::*;

        #[rstest]
        fn accepts_valid_fields() {
            let errors = User::validate_profile("Margaret", "margaret", "secret");
            assert!(errors.is_empty());
        }

        #[rstest]
        #[case("Meg")]
        #[case("    Meg    ")]
        #[case("")]
        fn rejects_short_name(#[case] name: &str) {
            let errors = User::validate_profile(name, "margaret", "secret");
            assert_eq!(
                errors,
                vec!["Name must be at least 5 characters long".to_string()]
            );
        }

        #[rstest]
        #[case("")]
        #[case("   ")]
        fn rejects_blank_login(#[case] login: &str) {
            let errors = User::validate_profile("Margaret", login, "secret");
            assert_eq!(errors, vec!["Login must not be blank".to_string()]);
        }

        #[rstest]
        #[case("abc")]
        #[case("")]
        fn rejects_short_password(#[case] password: &str) {
            let errors = User::validate_profile("Margaret", "margaret", password);
            assert_eq!(
                errors,
                vec!["Password must be at least 4 characters long".to_string()]
            );
        }

        #[rstest]
        fn reports_all_violations_at_once() {
            let errors = User::validate_profile("", "", "");
            assert_eq!(errors.len(), 3);
        }

        #[rstest]
        fn password_length_is_exactly_four() {
            assert!(User::validate_profile("Margaret", "margaret", "abcd").is_empty());
        }
    }
}
