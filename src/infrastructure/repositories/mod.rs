//! Persistence layer.
//!
//! SQLite-backed repositories over the domain model:
//! - `users`: account rows keyed by id and login
//! - `tasks`: task rows with owner, priority, and category links
//! - `categories`: category reference data
//! - `priorities`: priority reference data

mod categories;
mod priorities;
mod tasks;
mod users;

pub use categories::CategoryRepository;
pub use priorities::PriorityRepository;
pub use tasks::TaskRepository;
pub use users::UserRepository;
