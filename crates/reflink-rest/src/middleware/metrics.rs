//! Request metrics middleware.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::Request,
    middleware::Next,
    response::Response,
};
use reflink_service::metrics::HttpMetrics;
use std::time::Instant;

/// Records request count and latency labelled by route template.
///
/// Requests that matched no route share the `unmatched` label so unknown
/// paths cannot grow the label set.
pub async fn metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| "unmatched".to_string(), |p| p.as_str().to_string());
    let method = request.method().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    HttpMetrics::request(&path, &method, response.status().as_u16(), start.elapsed());
    response
}
