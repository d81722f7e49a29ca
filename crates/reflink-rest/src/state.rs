//! Application state for Axum handlers.

use metrics_exporter_prometheus::PrometheusHandle;
use reflink_repository::DatabasePoolInterface;
use reflink_service::{LinkService, PaymentService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<dyn LinkService>,
    pub user_service: Arc<dyn UserService>,
    pub payment_service: Arc<dyn PaymentService>,
    /// Pinged by the readiness probe.
    pub database: Arc<dyn DatabasePoolInterface>,
    /// Renders `/metrics`; the route answers 404 when absent.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        link_service: Arc<dyn LinkService>,
        user_service: Arc<dyn UserService>,
        payment_service: Arc<dyn PaymentService>,
        database: Arc<dyn DatabasePoolInterface>,
    ) -> Self {
        Self {
            link_service,
            user_service,
            payment_service,
            database,
            metrics: None,
        }
    }

    /// Attaches the Prometheus handle used by `/metrics`.
    #[must_use]
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}
