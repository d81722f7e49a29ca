//! Payment service trait definition.

use crate::dto::{CreatePaymentRequest, UpdatePaymentRequest};
use reflink_core::{Interface, Payment, PaymentId, ReflinkResult};
use async_trait::async_trait;

/// Payment service trait.
#[async_trait]
pub trait PaymentService: Interface + Send + Sync {
    /// Records a payment for an existing user.
    async fn create_payment(&self, request: CreatePaymentRequest) -> ReflinkResult<Payment>;

    /// Applies a partial update to a payment.
    async fn update_payment(
        &self,
        id: PaymentId,
        request: UpdatePaymentRequest,
    ) -> ReflinkResult<Payment>;

    /// Lists all payments.
    async fn list_payments(&self) -> ReflinkResult<Vec<Payment>>;
}
