//! Link-related DTOs.

use reflink_core::{Link, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to issue a referral link.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateLinkRequest {
    /// The referrer the link is issued for.
    pub user_id: UserId,

    /// Maximum number of redemptions.
    #[serde(alias = "link_limit")]
    #[validate(range(min = 0, message = "Limit cannot be negative"))]
    pub limit: i64,
}

/// A freshly issued link.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssuedLinkResponse {
    pub token: String,
    pub link: Link,
}

impl From<Link> for IssuedLinkResponse {
    fn from(link: Link) -> Self {
        Self {
            token: link.token.clone(),
            link,
        }
    }
}

/// Outcome of a redemption attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RedeemResponse {
    pub allowed: bool,
}

/// Request to enable or disable a link.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetLinkStatusRequest {
    pub enabled: bool,
}
