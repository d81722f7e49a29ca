//! Payment entity and partial-update patch.

use crate::{PaymentId, User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned to a payment created without one.
pub const DEFAULT_PAYMENT_STATUS: &str = "pending";

/// A payment recorded against a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Payment {
    /// Store-assigned identifier.
    pub id: PaymentId,

    /// Owning user.
    pub user_id: UserId,

    pub amount: f64,

    pub description: String,

    /// Free-form status string.
    pub status: String,

    /// The owning user, populated on reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// A payment record ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: UserId,
    pub amount: f64,
    pub description: String,
    pub status: String,
}

/// Fields to overwrite on an existing payment. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaymentPatch {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl PaymentPatch {
    /// Builds a patch from a loosely-typed update where zero and empty values
    /// mean "leave unchanged".
    #[must_use]
    pub fn from_partial(amount: f64, description: &str, status: &str) -> Self {
        Self {
            amount: (amount != 0.0).then_some(amount),
            description: (!description.is_empty()).then(|| description.to_string()),
            status: (!status.is_empty()).then(|| status.to_string()),
        }
    }

    /// Returns true if the patch would not change anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.amount.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Applies the patch in place.
    pub fn apply_to(&self, payment: &mut Payment) {
        if let Some(amount) = self.amount {
            payment.amount = amount;
        }
        if let Some(description) = &self.description {
            payment.description.clone_from(description);
        }
        if let Some(status) = &self.status {
            payment.status.clone_from(status);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payment() -> Payment {
        let now = Utc::now();
        Payment {
            id: PaymentId::new(1),
            user_id: UserId::new(1),
            amount: 100.0,
            description: "initial".to_string(),
            status: DEFAULT_PAYMENT_STATUS.to_string(),
            user: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_zero_and_empty_fields_are_ignored() {
        let patch = PaymentPatch::from_partial(0.0, "", "paid");
        assert_eq!(patch.amount, None);
        assert_eq!(patch.description, None);
        assert_eq!(patch.status.as_deref(), Some("paid"));
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let mut payment = payment();
        PaymentPatch::from_partial(0.0, "", "paid").apply_to(&mut payment);
        assert_eq!(payment.amount, 100.0);
        assert_eq!(payment.description, "initial");
        assert_eq!(payment.status, "paid");
    }

    #[test]
    fn test_negative_amount_is_applied() {
        let mut payment = payment();
        PaymentPatch::from_partial(-5.0, "", "").apply_to(&mut payment);
        assert_eq!(payment.amount, -5.0);
    }

    #[test]
    fn test_empty_patch() {
        assert!(PaymentPatch::from_partial(0.0, "", "").is_empty());
        assert!(!PaymentPatch::from_partial(1.0, "", "").is_empty());
    }
}
