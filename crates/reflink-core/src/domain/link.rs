//! Referral link entity.

use crate::{LinkId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A referral link issued to a referring user.
///
/// `count` never exceeds `limit` through a successful redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Link {
    /// Store-assigned identifier.
    pub id: LinkId,

    /// Globally unique, URL-safe referral token.
    pub token: String,

    /// The user who owns the link.
    pub referrer_id: UserId,

    /// Number of successful redemptions so far.
    pub count: i64,

    /// Disabled links cannot be redeemed.
    pub enabled: bool,

    /// Maximum number of redemptions.
    pub limit: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Returns true once the usage ceiling has been reached.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.count >= self.limit
    }

    /// Returns true if a redemption attempt could currently succeed.
    #[must_use]
    pub const fn can_redeem(&self) -> bool {
        self.enabled && !self.is_exhausted()
    }
}

/// A freshly generated link ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub token: String,
    pub referrer_id: UserId,
    pub limit: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(count: i64, limit: i64, enabled: bool) -> Link {
        let now = Utc::now();
        Link {
            id: LinkId::new(1),
            token: "tok".to_string(),
            referrer_id: UserId::new(1),
            count,
            enabled,
            limit,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_zero_limit_is_exhausted() {
        let link = link(0, 0, true);
        assert!(link.is_exhausted());
        assert!(!link.can_redeem());
    }

    #[test]
    fn test_redeemable_below_limit() {
        assert!(link(1, 3, true).can_redeem());
        assert!(!link(3, 3, true).can_redeem());
    }

    #[test]
    fn test_disabled_link_cannot_redeem() {
        assert!(!link(0, 3, false).can_redeem());
    }
}
