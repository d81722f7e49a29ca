//! SQLite user repository implementation.

use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reflink_core::{NewUser, ReflinkResult, User, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// SQLite user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct SqliteUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteUserRepository {
    /// Creates a new SQLite user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
pub(crate) struct UserRow {
    id: i64,
    first_name: String,
    second_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    phone: String,
    role: String,
    referrer_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::new(row.id),
            first_name: row.first_name,
            second_name: row.second_name,
            last_name: row.last_name,
            email: row.email,
            password_hash: row.password_hash,
            phone: row.phone,
            role: row.role,
            referrer_id: row.referrer_id.map(UserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn save(&self, user: NewUser) -> ReflinkResult<User> {
        debug!("Saving user: {}", user.email);

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users (first_name, second_name, last_name, email, password_hash,
                               phone, role, referrer_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.first_name)
        .bind(&user.second_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .bind(&user.role)
        .bind(user.referrer_id.map(UserId::into_inner))
        .bind(now)
        .bind(now)
        .execute(self.pool.inner())
        .await?;

        Ok(User {
            id: UserId::new(result.last_insert_rowid()),
            first_name: user.first_name,
            second_name: user.second_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            role: user.role,
            referrer_id: user.referrer_id,
            created_at: now,
            updated_at: now,
        })
    }

    async fn find_by_id(&self, id: UserId) -> ReflinkResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, second_name, last_name, email, password_hash,
                   phone, role, referrer_id, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(row.map(User::from))
    }

    async fn find_all(&self) -> ReflinkResult<Vec<User>> {
        debug!("Finding all users");

        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, first_name, second_name, last_name, email, password_hash,
                   phone, role, referrer_id, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool.inner())
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
