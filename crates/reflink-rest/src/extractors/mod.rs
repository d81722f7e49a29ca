//! Custom Axum extractors.

mod json;
mod validated;

pub use json::*;
pub use validated::*;
