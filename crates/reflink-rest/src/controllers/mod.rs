//! REST API controllers.

pub mod health_controller;
pub mod link_controller;
pub mod payment_controller;
pub mod user_controller;
