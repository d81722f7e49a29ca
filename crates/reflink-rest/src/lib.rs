//! # Reflink REST
//!
//! HTTP endpoints for referral links, users and payments, plus health,
//! metrics and OpenAPI routes.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
