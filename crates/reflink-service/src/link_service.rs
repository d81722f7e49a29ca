//! Link service trait definition.

use crate::dto::{CreateLinkRequest, IssuedLinkResponse};
use reflink_core::{Interface, Link, ReflinkResult, User};
use async_trait::async_trait;

/// Issuance, redemption and listing of referral links.
#[async_trait]
pub trait LinkService: Interface + Send + Sync {
    /// Issues a new link for an existing user.
    async fn issue_link(&self, request: CreateLinkRequest) -> ReflinkResult<IssuedLinkResponse>;

    /// Records one redemption of `token`.
    ///
    /// Returns `false` for unknown, disabled or exhausted links.
    async fn redeem(&self, token: &str) -> ReflinkResult<bool>;

    /// Redeems `token` and returns the link as it was found, or `None` if
    /// the redemption was refused.
    async fn redeem_for_referral(&self, token: &str) -> ReflinkResult<Option<Link>>;

    /// Returns a redemption taken by `redeem_for_referral` whose registration
    /// then failed.
    async fn release_redemption(&self, link: &Link) -> ReflinkResult<()>;

    /// Returns the user who owns the link.
    async fn get_referrer(&self, token: &str) -> ReflinkResult<User>;

    /// Enables or disables a link.
    async fn set_link_status(&self, token: &str, enabled: bool) -> ReflinkResult<Link>;

    /// Lists all links.
    async fn list_links(&self) -> ReflinkResult<Vec<Link>>;
}
