//! Domain layer for the to-do application.
//!
//! This module contains the core entities and domain rules:
//!
//! - **Entities**: `User`, `Task`, `Category`, `Priority`
//! - **Errors**: the `TodoError` taxonomy returned by the service layer
//! - **Time**: timezone resolution and display formatting for task timestamps
//!
//! The domain layer has no knowledge of HTTP or the database. Entities are
//! plain structs moved through services and repositories; all persistence
//! and presentation concerns live in the outer layers.

mod category;
mod errors;
mod priority;
mod task;
pub mod time;
mod user;

pub use category::Category;
pub use errors::TodoError;
pub use priority::Priority;
pub use task::Task;
pub use user::User;
