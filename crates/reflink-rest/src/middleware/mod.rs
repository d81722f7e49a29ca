//! HTTP middleware.

mod logging;
mod metrics;

pub use logging::*;
pub use metrics::*;
