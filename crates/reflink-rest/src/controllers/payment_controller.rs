//! Payment controller.

use crate::{
    extractors::ApiJson,
    responses::{created, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, patch},
    Router,
};
use reflink_core::{Payment, PaymentId, ReflinkError};
use reflink_service::{CreatePaymentRequest, UpdatePaymentRequest};
use tracing::debug;

/// Creates the payment router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_payments).post(create_payment))
        .route("/:id", patch(update_payment))
}

/// Record a payment.
#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded", body = Payment),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_payment(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePaymentRequest>,
) -> CreatedResult<Payment> {
    debug!("Create payment request for user {}", request.user_id);

    let payment = state.payment_service.create_payment(request).await?;
    Ok(created(payment))
}

/// List all payments.
#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    responses((status = 200, description = "All payments", body = [Payment]))
)]
pub async fn list_payments(State(state): State<AppState>) -> ApiResult<Vec<Payment>> {
    ok(state.payment_service.list_payments().await?)
}

/// Partially update a payment.
///
/// A zero amount or an empty string leaves that field unchanged.
#[utoipa::path(
    patch,
    path = "/payments/{id}",
    tag = "payments",
    params(("id" = i64, Path, description = "Payment id")),
    request_body = UpdatePaymentRequest,
    responses(
        (status = 200, description = "Updated payment", body = Payment),
        (status = 404, description = "Payment not found")
    )
)]
pub async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<UpdatePaymentRequest>,
) -> ApiResult<Payment> {
    debug!("Update payment request: {}", id);

    let payment_id = id
        .parse::<i64>()
        .map(PaymentId::new)
        .map_err(|_| AppError(ReflinkError::validation(format!("Invalid payment id: {}", id))))?;

    ok(state.payment_service.update_payment(payment_id, request).await?)
}
