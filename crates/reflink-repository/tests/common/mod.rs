//! Common test infrastructure for database integration tests.

#![allow(dead_code)]

use reflink_core::{NewUser, User};
use reflink_repository::{
    DatabasePool, DatabasePoolInterface, SqliteLinkRepository, SqlitePaymentRepository,
    SqliteUserRepository, UserRepository,
};
use std::sync::Arc;

/// In-memory SQLite database with migrations applied.
pub struct TestDatabase {
    pool: Arc<DatabasePool>,
}

impl TestDatabase {
    /// Creates a fresh, private database.
    pub async fn new() -> Self {
        let pool = DatabasePool::in_memory()
            .await
            .expect("Failed to open in-memory database");
        Self {
            pool: Arc::new(pool),
        }
    }

    /// Returns the pool as the injectable interface.
    pub fn pool(&self) -> Arc<dyn DatabasePoolInterface> {
        Arc::clone(&self.pool) as Arc<dyn DatabasePoolInterface>
    }

    pub fn users(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(self.pool())
    }

    pub fn links(&self) -> SqliteLinkRepository {
        SqliteLinkRepository::new(self.pool())
    }

    pub fn payments(&self) -> SqlitePaymentRepository {
        SqlitePaymentRepository::new(self.pool())
    }

    /// Inserts a user with the given email.
    pub async fn create_user(&self, email: &str) -> User {
        self.users()
            .save(new_user(email))
            .await
            .expect("Failed to insert user")
    }
}

/// Builds a valid user record.
pub fn new_user(email: &str) -> NewUser {
    NewUser {
        first_name: "Grace".to_string(),
        second_name: String::new(),
        last_name: "Hopper".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$v=19$stub".to_string(),
        phone: "+14155552671".to_string(),
        role: "customer".to_string(),
        referrer_id: None,
    }
}
