//! Repository trait definitions.

use async_trait::async_trait;
use reflink_core::{
    Interface, Link, LinkId, NewLink, NewPayment, NewUser, Payment, PaymentId, PaymentPatch,
    ReflinkResult, User, UserId,
};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Inserts a new user and returns it with its assigned id.
    async fn save(&self, user: NewUser) -> ReflinkResult<User>;

    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> ReflinkResult<Option<User>>;

    /// Returns every user ordered by id.
    async fn find_all(&self) -> ReflinkResult<Vec<User>>;
}

/// Referral link repository trait.
#[async_trait]
pub trait LinkRepository: Interface + Send + Sync {
    /// Inserts a new link with a zero redemption count.
    ///
    /// A duplicate token yields `ReflinkError::Conflict`.
    async fn save(&self, link: NewLink) -> ReflinkResult<Link>;

    /// Finds a link by its token.
    async fn find_by_token(&self, token: &str) -> ReflinkResult<Option<Link>>;

    /// Returns every link ordered by id.
    async fn find_all(&self) -> ReflinkResult<Vec<Link>>;

    /// Atomically records one redemption if the link is enabled and below its
    /// limit. Returns false when nothing was recorded.
    async fn try_redeem(&self, id: LinkId) -> ReflinkResult<bool>;

    /// Gives back one redemption recorded by `try_redeem`. Returns false when
    /// the link does not exist or has no redemptions.
    async fn release_redemption(&self, id: LinkId) -> ReflinkResult<bool>;

    /// Enables or disables a link. Returns false if the link does not exist.
    async fn set_enabled(&self, id: LinkId, enabled: bool) -> ReflinkResult<bool>;
}

/// Payment repository trait.
#[async_trait]
pub trait PaymentRepository: Interface + Send + Sync {
    /// Inserts a new payment and returns it with its owner populated.
    async fn save(&self, payment: NewPayment) -> ReflinkResult<Payment>;

    /// Finds a payment by ID.
    async fn find_by_id(&self, id: PaymentId) -> ReflinkResult<Option<Payment>>;

    /// Returns every payment ordered by id.
    async fn find_all(&self) -> ReflinkResult<Vec<Payment>>;

    /// Returns the payments owned by a user, ordered by id.
    async fn find_by_user(&self, user_id: UserId) -> ReflinkResult<Vec<Payment>>;

    /// Overwrites the fields present in `patch` and returns the updated
    /// payment, or `None` if it does not exist.
    async fn apply_patch(&self, id: PaymentId, patch: PaymentPatch) -> ReflinkResult<Option<Payment>>;
}
