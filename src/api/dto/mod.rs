//! Request and response shapes.
//!
//! - `forms`: urlencoded bodies accepted by the handlers
//! - `views`: JSON view models returned to the client

pub mod forms;
pub mod views;
