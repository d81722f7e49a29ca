//! Validated JSON extractor for automatic request validation.
//!
//! `ValidatedJson<T>` deserializes the body like [`ApiJson`] and then runs the
//! `validator` rules declared on `T`. Failures are returned as
//! 422 Unprocessable Entity listing every failing field.

use super::ApiJson;
use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
};
use reflink_core::ValidateExt;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that validates the deserialized value.
///
/// ```ignore
/// async fn issue(ValidatedJson(request): ValidatedJson<CreateLinkRequest>) {
///     // request.limit is known to be non-negative here
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T> std::ops::Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(value) = ApiJson::<T>::from_request(req, state).await?;

        value.validate_request()?;

        Ok(ValidatedJson(value))
    }
}
