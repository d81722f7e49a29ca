//! JSON extractor whose rejections use the API error envelope.

use crate::responses::AppError;
use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use reflink_core::ReflinkError;
use serde::de::DeserializeOwned;

/// Like [`axum::Json`], but a malformed body answers
/// `400 {success: false, error: {...}}` instead of plain text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            AppError(ReflinkError::validation(format!(
                "Invalid JSON: {}",
                rejection.body_text()
            )))
        })?;

        Ok(ApiJson(value))
    }
}
