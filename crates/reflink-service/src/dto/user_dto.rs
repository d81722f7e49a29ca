//! User-related DTOs.

use reflink_core::UserId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to register a user.
///
/// Field rules are enforced by the configured
/// [`UserValidator`](crate::UserValidator).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 50, message = "First name must be 2-50 characters"))]
    pub first_name: String,

    /// Missing in the body is reported by the validator, not the parser.
    #[serde(default)]
    #[validate(length(min = 2, max = 50, message = "Second name must be 2-50 characters"))]
    pub second_name: String,

    #[validate(length(min = 2, max = 50, message = "Last name must be 2-50 characters"))]
    pub last_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 2, max = 50, message = "Password must be 2-50 characters"))]
    pub password: String,

    #[validate(custom(
        function = "reflink_core::rules::e164_phone",
        message = "Phone must be in E.164 format"
    ))]
    pub phone: String,

    #[validate(custom(function = "reflink_core::rules::not_blank", message = "Role is required"))]
    pub role: String,

    /// Referring user; `0` or absent means none.
    #[serde(default)]
    pub referrer_id: Option<i64>,
}

impl CreateUserRequest {
    /// The referrer named in the request, if any.
    #[must_use]
    pub fn referrer(&self) -> Option<UserId> {
        self.referrer_id.and_then(UserId::non_zero)
    }
}

/// Registration through a referral link.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferralRegistrationRequest {
    pub user: CreateUserRequest,

    /// Token of the link being redeemed.
    #[serde(alias = "url")]
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_referrer_means_none() {
        let mut request = CreateUserRequest {
            referrer_id: Some(0),
            ..CreateUserRequest::default()
        };
        assert_eq!(request.referrer(), None);

        request.referrer_id = Some(4);
        assert_eq!(request.referrer(), Some(UserId::new(4)));
    }

    #[test]
    fn test_referral_accepts_url_alias() {
        let json = r#"{
            "user": {
                "first_name": "Grace", "second_name": "Brewster", "last_name": "Hopper",
                "email": "grace@example.com", "password": "cobol",
                "phone": "+14155552671", "role": "customer"
            },
            "url": "abc"
        }"#;
        let request: ReferralRegistrationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.link, "abc");
        assert_eq!(request.user.second_name, "Brewster");
        assert_eq!(request.user.referrer(), None);
    }
}
