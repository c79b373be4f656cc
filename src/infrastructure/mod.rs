//! Infrastructure layer.
//!
//! - `config`: environment-driven application configuration
//! - `database`: SQLite pool setup, schema, and seed data
//! - `dependencies`: dependency container shared as router state
//! - `repositories`: SQLite-backed persistence for the domain model
//! - `session`: login session store

mod config;
pub mod database;
mod dependencies;
pub mod repositories;
mod session;

pub use config::{AppConfig, ConfigError};
pub use dependencies::AppDependencies;
pub use session::{InMemorySessionStore, SessionId, SessionStore};
