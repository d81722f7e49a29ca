//! End-to-end tests of the HTTP surface.

mod common;

use axum::http::{Method, StatusCode};
use common::{app, create_user, issue_link, send, user_body};
use serde_json::json;

#[tokio::test]
async fn test_health_endpoints() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _) = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::GET, "/live", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_metrics_without_recorder_is_not_found() {
    let app = app().await;
    let (status, _) = send(&app, Method::GET, "/metrics", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/links"].is_object());
}

#[tokio::test]
async fn test_limited_redemption_flow() {
    let app = app().await;
    let user_id = create_user(&app, "ref@example.com").await;
    let token = issue_link(&app, user_id, 2).await;
    assert_eq!(token.len(), 44);

    let uri = format!("/api/v1/links/{token}/redeem");
    for expected in [true, true, false] {
        let (status, body) = send(&app, Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["allowed"], expected);
    }

    let (_, body) = send(&app, Method::GET, "/api/v1/links", None).await;
    assert_eq!(body["data"][0]["count"], 2);
}

#[tokio::test]
async fn test_unknown_token_redeem_is_refused() {
    let app = app().await;
    let (status, body) = send(&app, Method::POST, "/api/v1/links/nope/redeem", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["allowed"], false);
}

#[tokio::test]
async fn test_referrer_lookup() {
    let app = app().await;
    let user_id = create_user(&app, "ref@example.com").await;
    let token = issue_link(&app, user_id, 1).await;

    let (status, body) =
        send(&app, Method::GET, &format!("/api/v1/links/{token}/referrer"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "ref@example.com");
    assert!(body["data"].get("password_hash").is_none());

    let (status, body) = send(&app, Method::GET, "/api/v1/links/missing/referrer", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_issue_link_for_unknown_user() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/links",
        Some(json!({ "user_id": 77, "limit": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_issue_link_accepts_link_limit_alias() {
    let app = app().await;
    let user_id = create_user(&app, "ref@example.com").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/links",
        Some(json!({ "user_id": user_id, "link_limit": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["link"]["limit"], 3);
}

#[tokio::test]
async fn test_disabled_link_cannot_be_redeemed() {
    let app = app().await;
    let user_id = create_user(&app, "ref@example.com").await;
    let token = issue_link(&app, user_id, 5).await;

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/links/{token}/status"),
        Some(json!({ "enabled": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["enabled"], false);

    let (_, body) = send(&app, Method::POST, &format!("/api/v1/links/{token}/redeem"), None).await;
    assert_eq!(body["data"]["allowed"], false);
}

#[tokio::test]
async fn test_invalid_email_is_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users",
        Some(user_body("not-an-email")),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["details"][0]["field"], "email");

    let (_, body) = send(&app, Method::GET, "/api/v1/users", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_second_name_is_rejected() {
    let app = app().await;
    let mut user = user_body("nosecond@example.com");
    user.as_object_mut().unwrap().remove("second_name");

    let (status, body) = send(&app, Method::POST, "/api/v1/users", Some(user)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["details"][0]["field"], "second_name");
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/payments",
        Some(json!({ "amount": "lots" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_referral_registration() {
    let app = app().await;
    let referrer_id = create_user(&app, "ref@example.com").await;
    let token = issue_link(&app, referrer_id, 1).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users/referral",
        Some(json!({ "user": user_body("new@example.com"), "link": token })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["referrer_id"], referrer_id);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/users/referral",
        Some(json!({ "user": user_body("late@example.com"), "link": token })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "Validation error: invalid referral link");
}

#[tokio::test]
async fn test_payment_create_update_and_list() {
    let app = app().await;
    let user_id = create_user(&app, "payer@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/payments",
        Some(json!({ "user_id": user_id, "amount": 10.0, "description": "plan" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["user"]["email"], "payer@example.com");
    let payment_id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/payments/{payment_id}"),
        Some(json!({ "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "paid");
    assert_eq!(body["data"]["amount"], 10.0);
    assert_eq!(body["data"]["description"], "plan");

    let (_, body) = send(
        &app,
        Method::GET,
        &format!("/api/v1/users/{user_id}/payments"),
        None,
    )
    .await;
    assert_eq!(body["data"][0]["status"], "paid");

    let (_, body) = send(&app, Method::GET, "/api/v1/payments", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_update_unknown_payment() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::PATCH,
        "/api/v1/payments/999",
        Some(json!({ "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let (status, _) = send(&app, Method::PATCH, "/api/v1/payments/abc", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_payment_update_refreshes_warm_listings() {
    let app = app().await;
    let user_id = create_user(&app, "warm@example.com").await;
    let owned_uri = format!("/api/v1/users/{user_id}/payments");

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/v1/payments",
        Some(json!({ "user_id": user_id, "amount": 4.0, "description": "plan" })),
    )
    .await;
    let payment_id = body["data"]["id"].as_i64().unwrap();

    let (_, body) = send(&app, Method::GET, "/api/v1/payments", None).await;
    assert_eq!(body["data"][0]["status"], "pending");
    let (_, body) = send(&app, Method::GET, &owned_uri, None).await;
    assert_eq!(body["data"][0]["status"], "pending");

    let (status, _) = send(
        &app,
        Method::PATCH,
        &format!("/api/v1/payments/{payment_id}"),
        Some(json!({ "status": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, Method::GET, "/api/v1/payments", None).await;
    assert_eq!(body["data"][0]["status"], "paid");
    let (_, body) = send(&app, Method::GET, &owned_uri, None).await;
    assert_eq!(body["data"][0]["status"], "paid");
}
