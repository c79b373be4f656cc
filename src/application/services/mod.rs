//! Application services.
//!
//! Stateful facades over the repositories that translate empty persistence
//! outcomes into typed [`crate::domain::TodoError`] values:
//! - `users`: registration, profile updates, credential checks
//! - `tasks`: task lifecycle including the save dispatch and completion
//! - `categories`: category lookups
//! - `priorities`: priority lookups

mod categories;
mod priorities;
mod tasks;
mod users;

pub use categories::CategoryService;
pub use priorities::PriorityService;
pub use tasks::TaskService;
pub use users::UserService;
