//! Account management and credential checks.

use crate::domain::{TodoError, User};
use crate::infrastructure::repositories::UserRepository;

// =============================================================================
// UserService
// =============================================================================

/// Turns the empty outcomes reported by [`UserRepository`] into typed errors.
#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
}

impl UserService {
    #[must_use]
    pub const fn new(users: UserRepository) -> Self {
        Self { users }
    }

    pub async fn find_all(&self) -> Vec<User> {
        self.users.find_all().await
    }

    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when no user has the given id.
    pub async fn find_by_id(&self, id: i64) -> Result<User, TodoError> {
        self.users
            .find_by_id(id)
            .await
            .ok_or_else(|| TodoError::not_found("user", id))
    }

    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when no user has the given login.
    pub async fn find_by_login(&self, login: &str) -> Result<User, TodoError> {
        self.users
            .find_by_login(login)
            .await
            .ok_or_else(|| TodoError::not_found("user", login))
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidArgument`] when the account could not be
    /// stored, which for a well-formed user means the login is taken.
    pub async fn add(&self, user: &User) -> Result<User, TodoError> {
        self.users.add(user).await.ok_or_else(|| {
            TodoError::invalid_argument(format!(
                "account with login '{}' already exists",
                user.login
            ))
        })
    }

    /// # Errors
    ///
    /// Returns [`TodoError::NotFound`] when the user is not persisted.
    pub async fn update(&self, user: &User) -> Result<User, TodoError> {
        self.users
            .update(user)
            .await
            .ok_or_else(|| TodoError::not_found("user", user.id))
    }

    pub async fn delete_by_id(&self, id: i64) {
        self.users.delete_by_id(id).await;
    }

    /// Checks a login and password pair against the stored account.
    ///
    /// An unknown login and a wrong password are indistinguishable from the
    /// caller's point of view.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::InvalidCredential`] when the pair does not match
    /// a stored account.
    pub async fn validate_login(&self, login: &str, password: &str) -> Result<User, TodoError> {
        match self.users.find_by_login(login).await {
            Some(user) if user.password == password => Ok(user),
            _ => Err(TodoError::InvalidCredential),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
