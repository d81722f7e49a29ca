//! # Reflink Server Library
//!
//! Dependency injection wiring and startup utilities for the Reflink server.

pub mod di;
pub mod startup;
