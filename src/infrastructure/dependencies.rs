//! Dependency container for the application.
//!
//! `AppDependencies` wires the SQLite pool into the repositories and
//! services once at startup and is then cloned into every request handler
//! as router state. The session store stays behind a trait object so tests
//! can swap in a store with a different expiry policy.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::application::services::{CategoryService, PriorityService, TaskService, UserService};
use crate::infrastructure::repositories::{
    CategoryRepository, PriorityRepository, TaskRepository, UserRepository,
};

use super::config::AppConfig;
use super::session::SessionStore;

/// Application dependency container.
///
/// Cloning is cheap: the services share one connection pool and the session
/// store is reference counted.
#[derive(Clone)]
pub struct AppDependencies {
    /// Application configuration.
    config: AppConfig,
    /// Account management and credential checks.
    users: UserService,
    /// Task lifecycle.
    tasks: TaskService,
    /// Category lookups.
    categories: CategoryService,
    /// Priority lookups.
    priorities: PriorityService,
    /// Live login sessions.
    sessions: Arc<dyn SessionStore>,
}

impl AppDependencies {
    /// Creates the container, building every service over the given pool.
    #[must_use]
    pub fn new(config: AppConfig, pool: SqlitePool, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            config,
            users: UserService::new(UserRepository::new(pool.clone())),
            tasks: TaskService::new(
                TaskRepository::new(pool.clone()),
                PriorityRepository::new(pool.clone()),
            ),
            categories: CategoryService::new(CategoryRepository::new(pool.clone())),
            priorities: PriorityService::new(PriorityRepository::new(pool)),
            sessions,
        }
    }

    /// Returns a reference to the application configuration.
    #[must_use]
    pub const fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns a reference to the user service.
    #[must_use]
    pub const fn users(&self) -> &UserService {
        &self.users
    }

    /// Returns a reference to the task service.
    #[must_use]
    pub const fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    /// Returns a reference to the category service.
    #[must_use]
    pub const fn categories(&self) -> &CategoryService {
        &self.categories
    }

    /// Returns a reference to the priority service.
    #[must_use]
    pub const fn priorities(&self) -> &PriorityService {
        &self.priorities
    }

    /// Returns a reference to the session store.
    #[must_use]
    pub const fn sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }

    /// Returns the application host from configuration.
    #[must_use]
    pub fn app_host(&self) -> &str {
        &self.config.app_host
    }

    /// Returns the application port from configuration.
    #[must_use]
    pub const fn app_port(&self) -> u16 {
        self.config.app_port
    }
}

impl std::fmt::Debug for AppDependencies {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("AppDependencies")
            .field("config", &self.config)
            .field("sessions", &"<dyn SessionStore>")
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;
    use crate::infrastructure::database;
    use crate::infrastructure::session::InMemorySessionStore;
    use rstest::rstest;
    use std::time::Duration;

    async fn create_test_dependencies() -> AppDependencies {
        let pool = database::connect("sqlite::memory:").await.unwrap();
        database::initialize_schema(&pool).await.unwrap();
        database::seed_reference_data(&pool).await.unwrap();

        AppDependencies::new(
            AppConfig::default(),
            pool,
            Arc::new(InMemorySessionStore::new(Duration::from_secs(1800))),
        )
    }

    #[rstest]
    #[tokio::test]
    async fn new_creates_container_with_config() {
        let dependencies = create_test_dependencies().await;

        assert_eq!(dependencies.config(), &AppConfig::default());
        assert_eq!(dependencies.app_host(), "0.0.0.0");
        assert_eq!(dependencies.app_port(), 8080);
    }

    #[rstest]
    #[tokio::test]
    async fn services_share_the_seeded_pool() {
        let dependencies = create_test_dependencies().await;

        assert!(dependencies.users().find_all().await.is_empty());
        assert_eq!(dependencies.categories().find_all().await.len(), 5);
        assert_eq!(dependencies.priorities().find_all().await.len(), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn clone_shares_the_session_store() {
        let dependencies = create_test_dependencies().await;
        let cloned = dependencies.clone();

        let user = User::new(
            "Margaret".to_string(),
            "margaret".to_string(),
            "secret".to_string(),
            None,
        );
        let session_id = dependencies.sessions().insert(user.clone()).await;

        assert_eq!(cloned.sessions().resolve(session_id).await, Some(user));
    }

    #[rstest]
    #[tokio::test]
    async fn debug_masks_the_session_store() {
        let dependencies = create_test_dependencies().await;
        let debug_output = format!("{dependencies:?}");

        assert!(debug_output.contains("AppDependencies"));
        assert!(debug_output.contains("config"));
        assert!(debug_output.contains("<dyn SessionStore>"));
    }

    #[rstest]
    fn app_dependencies_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AppDependencies>();
    }

    #[rstest]
    fn app_dependencies_is_sync() {
        fn assert_sync<T: Sync>() {}
        assert_sync::<AppDependencies>();
    }
}
