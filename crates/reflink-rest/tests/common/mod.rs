//! Router fixture over an in-memory SQLite store.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use reflink_config::{ObservabilityConfig, ServerConfig};
use reflink_repository::{
    DatabasePool, SqliteLinkRepository, SqlitePaymentRepository, SqliteUserRepository,
};
use reflink_rest::{create_router, AppState};
use reflink_security::{PasswordHasher, Sha256TokenGenerator};
use reflink_service::{
    DefaultUserValidator, InMemoryCache, LinkServiceComponent, PaymentServiceComponent,
    ReadModelCache, UserServiceComponent, DEFAULT_TTL,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

pub async fn app() -> Router {
    let pool = Arc::new(DatabasePool::in_memory().await.unwrap());
    let users = Arc::new(SqliteUserRepository::new(pool.clone()));
    let links = Arc::new(SqliteLinkRepository::new(pool.clone()));
    let payments = Arc::new(SqlitePaymentRepository::new(pool.clone()));

    let read_model = Arc::new(ReadModelCache::new(
        Arc::new(InMemoryCache::new()),
        users.clone(),
        links.clone(),
        payments.clone(),
        DEFAULT_TTL,
    ));
    let link_service = Arc::new(LinkServiceComponent::new(
        links,
        users.clone(),
        Arc::new(Sha256TokenGenerator::new("router-test-secret-value")),
        read_model.clone(),
    ));
    let user_service = Arc::new(UserServiceComponent::new(
        users.clone(),
        link_service.clone(),
        Arc::new(DefaultUserValidator::new()),
        Arc::new(PasswordHasher::with_cost(1)),
        read_model.clone(),
    ));
    let payment_service = Arc::new(PaymentServiceComponent::new(payments, users, read_model));

    let state = AppState::new(link_service, user_service, payment_service, pool);
    create_router(state, &ServerConfig::default(), &ObservabilityConfig::default())
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub fn user_body(email: &str) -> Value {
    json!({
        "first_name": "Grace",
        "second_name": "Brewster",
        "last_name": "Hopper",
        "email": email,
        "password": "cobol",
        "phone": "+14155552671",
        "role": "customer"
    })
}

pub async fn create_user(app: &Router, email: &str) -> i64 {
    let (status, body) = send(app, Method::POST, "/api/v1/users", Some(user_body(email))).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().unwrap()
}

pub async fn issue_link(app: &Router, user_id: i64, limit: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/links",
        Some(json!({ "user_id": user_id, "limit": limit })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["token"].as_str().unwrap().to_string()
}
