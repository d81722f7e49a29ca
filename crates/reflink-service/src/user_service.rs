//! User service trait definition.

use crate::dto::{CreateUserRequest, ReferralRegistrationRequest};
use reflink_core::{Interface, Payment, ReflinkResult, User, UserId};
use async_trait::async_trait;

/// User service trait.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, request: CreateUserRequest) -> ReflinkResult<User>;

    /// Creates a user referred by the owner of `request.link`, consuming one
    /// redemption of that link.
    async fn create_user_with_referral(
        &self,
        request: ReferralRegistrationRequest,
    ) -> ReflinkResult<User>;

    /// Lists all users.
    async fn list_users(&self) -> ReflinkResult<Vec<User>>;

    /// Lists the payments of one user.
    async fn list_user_payments(&self, id: UserId) -> ReflinkResult<Vec<Payment>>;
}
