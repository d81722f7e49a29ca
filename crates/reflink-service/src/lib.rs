//! # Reflink Service
//!
//! Business logic for referral links, users and payments, plus the
//! cache-aside read model that serves the listing endpoints.

pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod link_service;
pub mod metrics;
pub mod payment_service;
pub mod user_service;
pub mod user_validator;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::*;
pub use dto::*;
pub use link_service::*;
pub use payment_service::*;
pub use r#impl::*;
pub use user_service::*;
pub use user_validator::*;
