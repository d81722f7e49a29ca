//! SQLite repository implementations.

mod link_repository;
mod payment_repository;
mod user_repository;

pub use link_repository::*;
pub use payment_repository::*;
pub use user_repository::*;
