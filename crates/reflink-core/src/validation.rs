//! Validation utilities.

use crate::{FieldError, ReflinkError};
use validator::{Validate, ValidationErrors};

/// Extension trait for validation.
pub trait ValidateExt: Validate {
    /// Validates the struct and returns every failing field on error.
    fn validate_request(&self) -> Result<(), ReflinkError> {
        self.validate()
            .map_err(|e| ReflinkError::InvalidFields(validation_errors_to_field_errors(&e)))
    }
}

impl<T: Validate> ValidateExt for T {}

/// Flattens `validator::ValidationErrors` into field errors sorted by field name.
#[must_use]
pub fn validation_errors_to_field_errors(errors: &ValidationErrors) -> Vec<FieldError> {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: (*field).to_string(),
                message: error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string),
                code: error.code.to_string(),
            })
        })
        .collect();

    field_errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
    field_errors
}

/// Common validation functions.
pub mod rules {
    use validator::ValidationError;

    /// Validates that a string is not blank (not empty after trimming).
    pub fn not_blank(value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::new("not_blank"));
        }
        Ok(())
    }

    /// Validates an E.164 phone number: `+`, a non-zero leading digit, at most
    /// fifteen digits in total.
    pub fn e164_phone(phone: &str) -> Result<(), ValidationError> {
        let Some(digits) = phone.strip_prefix('+') else {
            return Err(ValidationError::new("e164"));
        };
        let valid = (2..=15).contains(&digits.len())
            && digits.chars().all(|c| c.is_ascii_digit())
            && !digits.starts_with('0');
        if !valid {
            return Err(ValidationError::new("e164"));
        }
        Ok(())
    }
}
