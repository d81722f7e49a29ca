//! Referral token generation.

mod generator;

pub use generator::*;
