//! Pluggable validation of user registrations.

use crate::dto::CreateUserRequest;
use reflink_core::{validation_errors_to_field_errors, FieldError, Interface};
use shaku::Component;
use validator::Validate;

/// Checks a registration before it is persisted.
pub trait UserValidator: Interface + Send + Sync {
    /// Returns every failing field, sorted by field name. Empty means valid.
    fn validate(&self, request: &CreateUserRequest) -> Vec<FieldError>;
}

/// Validator driven by the `validator` rules declared on
/// [`CreateUserRequest`]: required names, a valid email, an E.164 phone
/// number and a non-blank role.
#[derive(Component, Debug, Default)]
#[shaku(interface = UserValidator)]
pub struct DefaultUserValidator {}

impl DefaultUserValidator {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }
}

impl UserValidator for DefaultUserValidator {
    fn validate(&self, request: &CreateUserRequest) -> Vec<FieldError> {
        match Validate::validate(request) {
            Ok(()) => Vec::new(),
            Err(errors) => validation_errors_to_field_errors(&errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateUserRequest {
        CreateUserRequest {
            first_name: "Grace".to_string(),
            second_name: "Brewster".to_string(),
            last_name: "Hopper".to_string(),
            email: "grace@example.com".to_string(),
            password: "cobol".to_string(),
            phone: "+14155552671".to_string(),
            role: "customer".to_string(),
            referrer_id: None,
        }
    }

    #[test]
    fn test_valid_request_passes() {
        assert!(DefaultUserValidator::new().validate(&valid_request()).is_empty());
    }

    #[test]
    fn test_invalid_email() {
        let request = CreateUserRequest {
            email: "not-an-email".to_string(),
            ..valid_request()
        };
        let errors = DefaultUserValidator::new().validate(&request);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Invalid email address");
    }

    #[test]
    fn test_reports_every_failing_field_sorted() {
        let request = CreateUserRequest {
            first_name: "G".to_string(),
            email: "nope".to_string(),
            phone: "555-1234".to_string(),
            role: "  ".to_string(),
            ..valid_request()
        };
        let fields: Vec<_> = DefaultUserValidator::new()
            .validate(&request)
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["email", "first_name", "phone", "role"]);
    }

    #[test]
    fn test_second_name_is_required() {
        let request = CreateUserRequest {
            second_name: String::new(),
            ..valid_request()
        };
        let errors = DefaultUserValidator::new().validate(&request);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "second_name");
        assert_eq!(errors[0].code, "length");
    }

    #[test]
    fn test_phone_error_code() {
        let request = CreateUserRequest {
            phone: "+0123".to_string(),
            ..valid_request()
        };
        let errors = DefaultUserValidator::new().validate(&request);
        assert_eq!(errors[0].code, "e164");
    }
}
