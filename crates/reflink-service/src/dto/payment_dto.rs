//! Payment-related DTOs.

use reflink_core::{PaymentPatch, UserId, DEFAULT_PAYMENT_STATUS};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request to record a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePaymentRequest {
    pub user_id: UserId,

    pub amount: f64,

    #[serde(default)]
    pub description: String,

    /// Defaults to `pending`.
    #[serde(default)]
    pub status: Option<String>,
}

impl CreatePaymentRequest {
    /// The requested status, or the default when omitted or empty.
    #[must_use]
    pub fn status_or_default(&self) -> String {
        match self.status.as_deref() {
            Some(status) if !status.is_empty() => status.to_string(),
            _ => DEFAULT_PAYMENT_STATUS.to_string(),
        }
    }
}

/// Partial payment update.
///
/// Zero amounts and empty strings leave the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdatePaymentRequest {
    pub amount: f64,
    pub description: String,
    pub status: String,
}

impl UpdatePaymentRequest {
    #[must_use]
    pub fn into_patch(self) -> PaymentPatch {
        PaymentPatch::from_partial(self.amount, &self.description, &self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults_to_pending() {
        let request: CreatePaymentRequest =
            serde_json::from_str(r#"{"user_id": 1, "amount": 9.5}"#).unwrap();
        assert_eq!(request.status_or_default(), "pending");
        assert!(request.description.is_empty());
    }

    #[test]
    fn test_update_only_carries_present_fields() {
        let request: UpdatePaymentRequest = serde_json::from_str(r#"{"status": "paid"}"#).unwrap();
        let patch = request.into_patch();
        assert_eq!(patch.status.as_deref(), Some("paid"));
        assert!(patch.amount.is_none());
        assert!(patch.description.is_none());
    }
}
