//! # Reflink Repository
//!
//! Data access for users, referral links and payments.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn LinkRepository>   (domain interface)
//! SqliteLinkRepository           (SQLx implementation)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite
//! ```

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::*;
pub use traits::*;
