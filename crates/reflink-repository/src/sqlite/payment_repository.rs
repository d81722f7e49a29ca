//! SQLite payment repository implementation.

use crate::{traits::PaymentRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reflink_core::{
    NewPayment, Payment, PaymentId, PaymentPatch, ReflinkError, ReflinkResult, User, UserId,
};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite payment repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = PaymentRepository)]
pub struct SqlitePaymentRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqlitePaymentRepository {
    /// Creates a new SQLite payment repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Selects a payment joined with its owner. Owner columns are prefixed `u_`.
const SELECT_PAYMENT: &str = r#"
    SELECT p.id, p.user_id, p.amount, p.description, p.status, p.created_at, p.updated_at,
           u.id AS u_id, u.first_name AS u_first_name, u.second_name AS u_second_name,
           u.last_name AS u_last_name, u.email AS u_email, u.phone AS u_phone,
           u.role AS u_role, u.referrer_id AS u_referrer_id,
           u.created_at AS u_created_at, u.updated_at AS u_updated_at
    FROM payments p
    LEFT JOIN users u ON u.id = p.user_id
"#;

#[derive(Debug, FromRow)]
struct PaymentRow {
    id: i64,
    user_id: i64,
    amount: f64,
    description: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    u_id: Option<i64>,
    u_first_name: Option<String>,
    u_second_name: Option<String>,
    u_last_name: Option<String>,
    u_email: Option<String>,
    u_phone: Option<String>,
    u_role: Option<String>,
    u_referrer_id: Option<i64>,
    u_created_at: Option<DateTime<Utc>>,
    u_updated_at: Option<DateTime<Utc>>,
}

impl PaymentRow {
    fn owner(&mut self) -> Option<User> {
        let id = self.u_id?;
        Some(User {
            id: UserId::new(id),
            first_name: self.u_first_name.take().unwrap_or_default(),
            second_name: self.u_second_name.take().unwrap_or_default(),
            last_name: self.u_last_name.take().unwrap_or_default(),
            email: self.u_email.take().unwrap_or_default(),
            password_hash: String::new(),
            phone: self.u_phone.take().unwrap_or_default(),
            role: self.u_role.take().unwrap_or_default(),
            referrer_id: self.u_referrer_id.map(UserId::new),
            created_at: self.u_created_at.unwrap_or(self.created_at),
            updated_at: self.u_updated_at.unwrap_or(self.updated_at),
        })
    }
}

impl From<PaymentRow> for Payment {
    fn from(mut row: PaymentRow) -> Self {
        let user = row.owner();
        Self {
            id: PaymentId::new(row.id),
            user_id: UserId::new(row.user_id),
            amount: row.amount,
            description: row.description,
            status: row.status,
            user,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl PaymentRepository for SqlitePaymentRepository {
    async fn save(&self, payment: NewPayment) -> ReflinkResult<Payment> {
        debug!("Saving payment for user: {}", payment.user_id);

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO payments (user_id, amount, description, status, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(payment.user_id.into_inner())
        .bind(payment.amount)
        .bind(&payment.description)
        .bind(&payment.status)
        .bind(now)
        .bind(now)
        .execute(self.pool.inner())
        .await?;

        let id = PaymentId::new(result.last_insert_rowid());
        self.find_by_id(id)
            .await?
            .ok_or_else(|| ReflinkError::integrity(format!("payment {} vanished after insert", id)))
    }

    async fn find_by_id(&self, id: PaymentId) -> ReflinkResult<Option<Payment>> {
        debug!("Finding payment by id: {}", id);

        let row = sqlx::query_as::<_, PaymentRow>(&format!("{SELECT_PAYMENT} WHERE p.id = ?"))
            .bind(id.into_inner())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(row.map(Payment::from))
    }

    async fn find_all(&self) -> ReflinkResult<Vec<Payment>> {
        debug!("Finding all payments");

        let rows = sqlx::query_as::<_, PaymentRow>(&format!("{SELECT_PAYMENT} ORDER BY p.id"))
            .fetch_all(self.pool.inner())
            .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn find_by_user(&self, user_id: UserId) -> ReflinkResult<Vec<Payment>> {
        debug!("Finding payments for user: {}", user_id);

        let rows = sqlx::query_as::<_, PaymentRow>(&format!(
            "{SELECT_PAYMENT} WHERE p.user_id = ? ORDER BY p.id"
        ))
        .bind(user_id.into_inner())
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Payment::from).collect())
    }

    async fn apply_patch(&self, id: PaymentId, patch: PaymentPatch) -> ReflinkResult<Option<Payment>> {
        debug!("Updating payment: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE payments
            SET amount = COALESCE(?, amount),
                description = COALESCE(?, description),
                status = COALESCE(?, status),
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(patch.amount)
        .bind(patch.description)
        .bind(patch.status)
        .bind(Utc::now())
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(id).await
    }
}
