//! Request middleware.
//!
//! - `auth`: session cookie filter guarding everything but the public paths
//! - `error_handler`: HTTP mapping for domain errors

pub mod auth;
pub mod error_handler;
