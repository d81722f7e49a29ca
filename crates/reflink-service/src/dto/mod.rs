//! Data Transfer Objects (DTOs).

mod link_dto;
mod payment_dto;
mod user_dto;

pub use link_dto::*;
pub use payment_dto::*;
pub use user_dto::*;
