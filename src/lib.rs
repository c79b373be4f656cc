//! Multi-user to-do list web application.
//!
//! Accounts register and log in with a session cookie; tasks carry a
//! priority, a category selection, and a creation timestamp rendered in each
//! viewer's timezone. The crate is layered the usual way:
//!
//! - [`domain`]: entities, validation, and the error taxonomy
//! - [`infrastructure`]: configuration, SQLite persistence, sessions
//! - [`application`]: services over the repositories
//! - [`api`]: Axum handlers, middleware, and routes

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
