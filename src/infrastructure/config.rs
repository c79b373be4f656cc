//! Application configuration loaded from environment variables.
//!
//! Configuration is read once at startup. A `.env` file is honored when
//! present. Every value except `DATABASE_URL` has a default, so a bare
//! environment still produces a runnable configuration via [`AppConfig::default`].

use std::env;
use std::num::ParseIntError;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required environment variable is not set.
    MissingEnvVar(String),
    /// An environment variable is set but cannot be used.
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingEnvVar(key) => {
                write!(formatter, "Missing environment variable: {key}")
            }
            Self::InvalidValue { key, message } => {
                write!(formatter, "Invalid value for {key}: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// AppConfig
// =============================================================================

/// Runtime configuration for the to-do service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    /// SQLite connection URL.
    pub database_url: String,
    /// Seconds an idle session stays valid.
    pub session_ttl_seconds: u64,
    /// HTTP server host address.
    pub app_host: String,
    /// HTTP server port.
    pub app_port: u16,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: SQLite connection string (required)
    /// - `SESSION_TTL_SECONDS`: idle session lifetime (optional, default: 1800)
    /// - `APP_HOST`: server host (optional, default: "0.0.0.0")
    /// - `APP_PORT`: server port (optional, default: 8080)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if a required variable is not set,
    /// `ConfigError::InvalidValue` if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let database_url = get_required_env("DATABASE_URL")?;
        let session_ttl_seconds = get_optional_env_parsed("SESSION_TTL_SECONDS", 1800)?;
        let app_host = get_optional_env("APP_HOST", "0.0.0.0".to_string());
        let app_port = get_optional_env_parsed("APP_PORT", 8080)?;

        Ok(Self {
            database_url,
            session_ttl_seconds,
            app_host,
            app_port,
        })
    }

    /// Creates a configuration from explicit values, mainly for tests.
    #[must_use]
    pub const fn new(
        database_url: String,
        session_ttl_seconds: u64,
        app_host: String,
        app_port: u16,
    ) -> Self {
        Self {
            database_url,
            session_ttl_seconds,
            app_host,
            app_port,
        }
    }
}

impl Default for AppConfig {
    /// A local-development configuration backed by a file database.
    fn default() -> Self {
        Self {
            database_url: "sqlite:todos.db".to_string(),
            session_ttl_seconds: 1800,
            app_host: "0.0.0.0".to_string(),
            app_port: 8080,
        }
    }
}

// =============================================================================
// Environment Helpers
// =============================================================================

fn get_required_env(key: &str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

fn get_optional_env(key: &str, default: String) -> String {
    env::var(key).unwrap_or(default)
}

fn get_optional_env_parsed<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = ParseIntError>,
{
    env::var(key).map_or_else(
        |_| Ok(default),
        |value| {
            value
                .parse()
                .map_err(|error: ParseIntError| ConfigError::InvalidValue {
                    key: key.to_string(),
                    message: error.to_string(),
                })
        },
    )
}

// =============================================================================
// Tests
// =============================================================================
