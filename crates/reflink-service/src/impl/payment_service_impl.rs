//! Payment service implementation.

use crate::cache::{AggregateCache, EntityKind};
use crate::dto::{CreatePaymentRequest, UpdatePaymentRequest};
use crate::payment_service::PaymentService;
use async_trait::async_trait;
use reflink_core::{NewPayment, Payment, PaymentId, ReflinkError, ReflinkResult};
use reflink_repository::{PaymentRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Payment service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = PaymentService)]
pub struct PaymentServiceComponent {
    #[shaku(inject)]
    payment_repository: Arc<dyn PaymentRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    read_model: Arc<dyn AggregateCache>,
}

impl PaymentServiceComponent {
    /// Creates a payment service from its collaborators.
    #[must_use]
    pub fn new(
        payment_repository: Arc<dyn PaymentRepository>,
        user_repository: Arc<dyn UserRepository>,
        read_model: Arc<dyn AggregateCache>,
    ) -> Self {
        Self {
            payment_repository,
            user_repository,
            read_model,
        }
    }
}

#[async_trait]
impl PaymentService for PaymentServiceComponent {
    async fn create_payment(&self, request: CreatePaymentRequest) -> ReflinkResult<Payment> {
        debug!("Creating payment for user {}", request.user_id);

        if self.user_repository.find_by_id(request.user_id).await?.is_none() {
            return Err(ReflinkError::not_found("User", request.user_id));
        }

        if request.amount <= 0.0 {
            warn!(
                "Recording non-positive payment amount {} for user {}",
                request.amount, request.user_id
            );
        }

        let status = request.status_or_default();
        let payment = self
            .payment_repository
            .save(NewPayment {
                user_id: request.user_id,
                amount: request.amount,
                description: request.description,
                status,
            })
            .await?;

        self.read_model
            .refresh(EntityKind::Payment {
                owner: payment.user_id,
            })
            .await;

        info!("Payment {} created for user {}", payment.id, payment.user_id);
        Ok(payment)
    }

    async fn update_payment(
        &self,
        id: PaymentId,
        request: UpdatePaymentRequest,
    ) -> ReflinkResult<Payment> {
        debug!("Updating payment: {}", id);

        let existing = self
            .payment_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ReflinkError::not_found("Payment", id))?;

        let patch = request.into_patch();
        if patch.is_empty() {
            debug!("Nothing to update for payment {}", id);
            return Ok(existing);
        }

        let updated = self
            .payment_repository
            .apply_patch(id, patch)
            .await?
            .ok_or_else(|| ReflinkError::not_found("Payment", id))?;

        self.read_model
            .refresh(EntityKind::Payment {
                owner: updated.user_id,
            })
            .await;

        info!("Payment updated: {}", id);
        Ok(updated)
    }

    async fn list_payments(&self) -> ReflinkResult<Vec<Payment>> {
        self.read_model.payments().await
    }
}

impl std::fmt::Debug for PaymentServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentServiceComponent").finish_non_exhaustive()
    }
}
