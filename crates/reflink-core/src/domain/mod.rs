//! Domain entities of the referral service.

pub mod link;
pub mod payment;
pub mod user;

pub use link::*;
pub use payment::*;
pub use user::*;
