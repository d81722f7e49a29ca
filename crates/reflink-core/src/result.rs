//! Result type aliases for Reflink.

use crate::ReflinkError;

/// A specialized `Result` type for Reflink operations.
pub type ReflinkResult<T> = Result<T, ReflinkError>;
