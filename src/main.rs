//! To-Do Application Entry Point
//!
//! Wires configuration, the SQLite pool, the session store, and the router
//! together and serves until interrupted.

use std::sync::Arc;
use std::time::Duration;

use todos::api::routes::create_router;
use todos::infrastructure::{AppConfig, AppDependencies, InMemorySessionStore, database};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,todos=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting To-Do Application...");

    // Load configuration
    let config = match AppConfig::from_env() {
        Ok(config) => {
            tracing::info!(
                "Configuration loaded: host={}, port={}",
                config.app_host,
                config.app_port
            );
            config
        }
        Err(e) => {
            tracing::warn!("Failed to load configuration from environment: {e}");
            tracing::info!("Using default configuration");
            AppConfig::default()
        }
    };

    let bind_address = format!("{}:{}", config.app_host, config.app_port);

    // Initialize storage
    let pool = database::connect(&config.database_url)
        .await
        .expect("Failed to open the database");
    database::initialize_schema(&pool)
        .await
        .expect("Failed to initialize the database schema");
    database::seed_reference_data(&pool)
        .await
        .expect("Failed to seed priorities and categories");
    tracing::info!("Database ready at {}", config.database_url);

    let sessions = Arc::new(InMemorySessionStore::new(Duration::from_secs(
        config.session_ttl_seconds,
    )));

    // Create dependencies container and router
    let deps = AppDependencies::new(config, pool, sessions);
    let app = create_router(deps);

    // Start server
    let listener = TcpListener::bind(&bind_address).await.unwrap();
    tracing::info!("To-Do Application started on http://{bind_address}");
    tracing::info!("Available endpoints:");
    tracing::info!("  GET  /                    - Redirect to the task list");
    tracing::info!("  GET  /tasks               - All tasks");
    tracing::info!("  GET  /newTasks            - Open tasks");
    tracing::info!("  GET  /doneTasks           - Completed tasks");
    tracing::info!("  GET  /taskDetails/{{id}}    - Task details");
    tracing::info!("  GET  /taskDone/{{id}}       - Mark a task completed");
    tracing::info!("  GET  /addTask             - Blank task form");
    tracing::info!("  GET  /editTask/{{id}}       - Prefilled task form");
    tracing::info!("  POST /addOrUpdateTask     - Save the task form");
    tracing::info!("  GET  /deleteTask/{{id}}     - Delete a task");
    tracing::info!("  GET  /login, POST /login  - Login");
    tracing::info!("  GET  /logout              - Logout");
    tracing::info!("  GET/POST /registration    - Registration");
    tracing::info!("  GET/POST /userEdit        - Profile");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    tracing::info!("To-Do Application stopped");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
    tracing::info!("Shutdown signal received");
}
