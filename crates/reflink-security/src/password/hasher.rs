//! Password hashing using Argon2.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher as _, SaltString},
    Argon2, Params,
};
use reflink_config::SecurityConfig;
use reflink_core::{Interface, ReflinkError, ReflinkResult};
use shaku::Component;
use std::sync::Arc;
use tracing::debug;

/// Interface for password hashing operations.
pub trait PasswordHasherInterface: Interface + Send + Sync {
    /// Hashes a password.
    fn hash(&self, password: &str) -> ReflinkResult<String>;
}

/// Password hasher service using Argon2id.
#[derive(Component, Clone)]
#[shaku(interface = PasswordHasherInterface)]
pub struct PasswordHasher {
    argon2: Arc<Argon2<'static>>,
}

impl PasswordHasher {
    fn with_params(params: Params) -> Self {
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);
        Self {
            argon2: Arc::new(argon2),
        }
    }

    /// Creates a password hasher from a memory cost in MiB.
    #[must_use]
    pub fn with_cost(cost: u32) -> Self {
        let params = Params::new(
            cost.saturating_mul(1024), // Memory cost in KiB
            2,                         // Time cost (iterations)
            1,                         // Parallelism
            None,
        )
        .unwrap_or(Params::DEFAULT);

        Self::with_params(params)
    }

    /// Creates a password hasher from the security configuration.
    #[must_use]
    pub fn from_config(config: &SecurityConfig) -> Self {
        Self::with_cost(config.password_hash_cost)
    }

    /// Returns the internal Argon2 instance, used as a shaku component parameter.
    #[must_use]
    pub fn argon2_arc(&self) -> Arc<Argon2<'static>> {
        Arc::clone(&self.argon2)
    }
}

impl PasswordHasherInterface for PasswordHasher {
    fn hash(&self, password: &str) -> ReflinkResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ReflinkError::Internal(format!("Failed to hash password: {}", e)))?;

        debug!("Password hashed successfully");
        Ok(hash.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    #[test]
    fn test_hash_is_verifiable_argon2id() {
        let hasher = PasswordHasher::with_cost(1);
        let hash = hasher.hash("s3cret").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        let parsed = PasswordHash::new(&hash).unwrap();
        assert!(Argon2::default().verify_password(b"s3cret", &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"wrong", &parsed).is_err());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = PasswordHasher::with_cost(1);
        assert_ne!(hasher.hash("same").unwrap(), hasher.hash("same").unwrap());
    }

    #[test]
    fn test_cost_from_config() {
        let hasher = PasswordHasher::from_config(&SecurityConfig {
            password_hash_cost: 1,
        });
        assert!(hasher.hash("pw").unwrap().contains("m=1024"));
    }
}
