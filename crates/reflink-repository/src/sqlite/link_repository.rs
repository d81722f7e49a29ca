//! SQLite referral link repository implementation.

use crate::{traits::LinkRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reflink_core::{Link, LinkId, NewLink, ReflinkResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite link repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = LinkRepository)]
pub struct SqliteLinkRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteLinkRepository {
    /// Creates a new SQLite link repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    token: String,
    referrer_id: i64,
    redemption_count: i64,
    enabled: bool,
    redemption_limit: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            id: LinkId::new(row.id),
            token: row.token,
            referrer_id: UserId::new(row.referrer_id),
            count: row.redemption_count,
            enabled: row.enabled,
            limit: row.redemption_limit,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn save(&self, link: NewLink) -> ReflinkResult<Link> {
        debug!("Saving link for referrer: {}", link.referrer_id);

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO links (token, referrer_id, redemption_count, enabled,
                               redemption_limit, created_at, updated_at)
            VALUES (?, ?, 0, 1, ?, ?, ?)
            "#,
        )
        .bind(&link.token)
        .bind(link.referrer_id.into_inner())
        .bind(link.limit)
        .bind(now)
        .bind(now)
        .execute(self.pool.inner())
        .await?;

        Ok(Link {
            id: LinkId::new(result.last_insert_rowid()),
            token: link.token,
            referrer_id: link.referrer_id,
            count: 0,
            enabled: true,
            limit: link.limit,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_token(&self, token: &str) -> ReflinkResult<Option<Link>> {
        debug!("Finding link by token");

        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, token, referrer_id, redemption_count, enabled,
                   redemption_limit, created_at, updated_at
            FROM links
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_all(&self) -> ReflinkResult<Vec<Link>> {
        debug!("Finding all links");

        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, token, referrer_id, redemption_count, enabled,
                   redemption_limit, created_at, updated_at
            FROM links
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn try_redeem(&self, id: LinkId) -> ReflinkResult<bool> {
        debug!("Redeeming link: {}", id);

        // The guard and the increment run as one statement, so concurrent
        // redeemers can never push the count past the limit.
        let result = sqlx::query(
            r#"
            UPDATE links
            SET redemption_count = redemption_count + 1, updated_at = ?
            WHERE id = ? AND enabled = 1 AND redemption_count < redemption_limit
            "#,
        )
        .bind(Utc::now())
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn release_redemption(&self, id: LinkId) -> ReflinkResult<bool> {
        debug!("Releasing redemption of link: {}", id);

        let result = sqlx::query(
            r#"
            UPDATE links
            SET redemption_count = redemption_count - 1, updated_at = ?
            WHERE id = ? AND redemption_count > 0
            "#,
        )
        .bind(Utc::now())
        .bind(id.into_inner())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn set_enabled(&self, id: LinkId, enabled: bool) -> ReflinkResult<bool> {
        debug!("Setting link {} enabled = {}", id, enabled);

        let result = sqlx::query("UPDATE links SET enabled = ?, updated_at = ? WHERE id = ?")
            .bind(enabled)
            .bind(Utc::now())
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
