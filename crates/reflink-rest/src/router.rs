//! Main application router.

use crate::{
    controllers::{health_controller, link_controller, payment_controller, user_controller},
    middleware::{logging_middleware, metrics_middleware},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{http::HeaderValue, middleware, routing::get, Json, Router};
use reflink_config::{ObservabilityConfig, ServerConfig};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;

/// Creates the main application router.
pub fn create_router(
    state: AppState,
    server_config: &ServerConfig,
    observability: &ObservabilityConfig,
) -> Router {
    let cors = create_cors_layer(server_config);

    let api_router = Router::new()
        .nest("/links", link_controller::router())
        .nest("/users", user_controller::router())
        .nest("/payments", payment_controller::router());

    let mut router = Router::new()
        .merge(health_controller::router())
        .nest("/api/v1", api_router)
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/", get(root));

    if observability.metrics_enabled {
        router = router.route(&observability.metrics_path, get(health_controller::metrics));
    }

    let router = router
        .with_state(state)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with REST endpoints under /api/v1");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }

    if server_config.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<_> = server_config
        .cors_origins
        .iter()
        .filter_map(|o| o.parse::<HeaderValue>().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "Reflink API v1"
}
