//! Request handlers.
//!
//! - `login`: login page, session creation, logout
//! - `registration`: account creation
//! - `tasks`: task lists, details, form, save, completion, deletion
//! - `profile`: profile editing with timezone selection

pub mod login;
pub mod profile;
pub mod registration;
pub mod tasks;
