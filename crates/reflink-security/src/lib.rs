//! # Reflink Security
//!
//! Password hashing (Argon2) and referral token generation (SHA-256).

pub mod password;
pub mod token;

pub use password::*;
pub use token::*;
