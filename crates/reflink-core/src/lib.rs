//! # Reflink Core
//!
//! Core types, entities, and error definitions for Reflink.
//! Every other crate in the workspace builds on these.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
