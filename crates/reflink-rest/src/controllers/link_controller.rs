//! Referral link controller.

use crate::{
    extractors::{ApiJson, ValidatedJson},
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, patch, post},
    Router,
};
use reflink_core::{Link, User};
use reflink_service::{CreateLinkRequest, IssuedLinkResponse, RedeemResponse, SetLinkStatusRequest};
use tracing::debug;

/// Creates the link router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_links).post(issue_link))
        .route("/:token/redeem", post(redeem_link))
        .route("/:token/referrer", get(get_referrer))
        .route("/:token/status", patch(set_link_status))
}

/// Issue a referral link for a user.
#[utoipa::path(
    post,
    path = "/links",
    tag = "links",
    request_body = CreateLinkRequest,
    responses(
        (status = 201, description = "Link issued", body = IssuedLinkResponse),
        (status = 404, description = "User not found"),
        (status = 422, description = "Invalid limit")
    )
)]
pub async fn issue_link(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateLinkRequest>,
) -> CreatedResult<IssuedLinkResponse> {
    debug!("Issue link request for user {}", request.user_id);

    let response = state.link_service.issue_link(request).await?;
    Ok(created(response))
}

/// List all links.
#[utoipa::path(
    get,
    path = "/links",
    tag = "links",
    responses((status = 200, description = "All links", body = [Link]))
)]
pub async fn list_links(State(state): State<AppState>) -> ApiResult<Vec<Link>> {
    ok(state.link_service.list_links().await?)
}

/// Redeem a link once.
#[utoipa::path(
    post,
    path = "/links/{token}/redeem",
    tag = "links",
    params(("token" = String, Path, description = "Link token")),
    responses((status = 200, description = "Redemption outcome", body = RedeemResponse))
)]
pub async fn redeem_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<RedeemResponse> {
    let allowed = state.link_service.redeem(&token).await?;
    ok(RedeemResponse { allowed })
}

/// Get the user who owns a link.
#[utoipa::path(
    get,
    path = "/links/{token}/referrer",
    tag = "links",
    params(("token" = String, Path, description = "Link token")),
    responses(
        (status = 200, description = "Referrer", body = User),
        (status = 404, description = "Link or user not found")
    )
)]
pub async fn get_referrer(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<User> {
    ok(state.link_service.get_referrer(&token).await?)
}

/// Enable or disable a link.
#[utoipa::path(
    patch,
    path = "/links/{token}/status",
    tag = "links",
    params(("token" = String, Path, description = "Link token")),
    request_body = SetLinkStatusRequest,
    responses(
        (status = 200, description = "Updated link", body = Link),
        (status = 404, description = "Link not found")
    )
)]
pub async fn set_link_status(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ApiJson(request): ApiJson<SetLinkStatusRequest>,
) -> ApiResult<Link> {
    debug!("Set link status request: enabled={}", request.enabled);

    ok(state.link_service.set_link_status(&token, request.enabled).await?)
}
