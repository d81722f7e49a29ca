//! OpenAPI documentation, served at `/api-docs/openapi.json`.

use reflink_core::{ErrorResponse, FieldError, Link, LinkId, Payment, PaymentId, User, UserId};
use reflink_service::{
    CreateLinkRequest, CreatePaymentRequest, CreateUserRequest, IssuedLinkResponse,
    RedeemResponse, ReferralRegistrationRequest, SetLinkStatusRequest, UpdatePaymentRequest,
};
use utoipa::OpenApi;

/// OpenAPI documentation for the Reflink API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Reflink API",
        version = "1.0.0",
        description = "Referral links with limited redemptions, users and payments",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Link endpoints
        crate::controllers::link_controller::issue_link,
        crate::controllers::link_controller::list_links,
        crate::controllers::link_controller::redeem_link,
        crate::controllers::link_controller::get_referrer,
        crate::controllers::link_controller::set_link_status,
        // User endpoints
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::create_user_with_referral,
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::list_user_payments,
        // Payment endpoints
        crate::controllers::payment_controller::create_payment,
        crate::controllers::payment_controller::list_payments,
        crate::controllers::payment_controller::update_payment,
        // Health endpoints
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            LinkId,
            PaymentId,
            User,
            Link,
            Payment,
            ErrorResponse,
            FieldError,
            CreateLinkRequest,
            IssuedLinkResponse,
            RedeemResponse,
            SetLinkStatusRequest,
            CreateUserRequest,
            ReferralRegistrationRequest,
            CreatePaymentRequest,
            UpdatePaymentRequest,
        )
    ),
    tags(
        (name = "links", description = "Referral link endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "payments", description = "Payment endpoints"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
