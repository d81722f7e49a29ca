//! User entity.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user. Any user can act as a referrer for links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    /// Store-assigned identifier.
    pub id: UserId,

    pub first_name: String,

    pub second_name: String,

    pub last_name: String,

    pub email: String,

    /// Argon2 hash of the user's password (never exposed via API).
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Phone number in E.164 form.
    pub phone: String,

    pub role: String,

    /// The user whose link brought this user in, if any.
    pub referrer_id: Option<UserId>,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A validated user record ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub second_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: String,
    pub role: String,
    pub referrer_id: Option<UserId>,
}
