//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `link_service.rs`).

pub mod link_service_impl;
pub mod payment_service_impl;
pub mod user_service_impl;

pub use link_service_impl::LinkServiceComponent;
pub use payment_service_impl::PaymentServiceComponent;
pub use user_service_impl::UserServiceComponent;
