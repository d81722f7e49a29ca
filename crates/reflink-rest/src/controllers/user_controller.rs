//! User controller.

use crate::{
    extractors::ApiJson,
    responses::{created, ok, ApiResult, AppError, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use reflink_core::{Payment, ReflinkError, User, UserId};
use reflink_service::{CreateUserRequest, ReferralRegistrationRequest};
use tracing::debug;

/// Creates the user router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/referral", post(create_user_with_referral))
        .route("/:id/payments", get(list_user_payments))
}

/// Register a user.
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> CreatedResult<User> {
    debug!("Create user request: {}", request.email);

    let user = state.user_service.create_user(request).await?;
    Ok(created(user))
}

/// Register a user through a referral link.
#[utoipa::path(
    post,
    path = "/users/referral",
    tag = "users",
    request_body = ReferralRegistrationRequest,
    responses(
        (status = 201, description = "User created", body = User),
        (status = 400, description = "Invalid referral link"),
        (status = 422, description = "Invalid fields")
    )
)]
pub async fn create_user_with_referral(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ReferralRegistrationRequest>,
) -> CreatedResult<User> {
    debug!("Referral registration request: {}", request.user.email);

    let user = state.user_service.create_user_with_referral(request).await?;
    Ok(created(user))
}

/// List all users.
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "All users", body = [User]))
)]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    ok(state.user_service.list_users().await?)
}

/// List the payments of a user.
#[utoipa::path(
    get,
    path = "/users/{id}/payments",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "Payments of the user", body = [Payment]))
)]
pub async fn list_user_payments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Payment>> {
    let user_id = parse_user_id(&id)?;
    ok(state.user_service.list_user_payments(user_id).await?)
}

fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    id.parse::<i64>()
        .map(UserId::new)
        .map_err(|_| AppError(ReflinkError::validation(format!("Invalid user id: {}", id))))
}
