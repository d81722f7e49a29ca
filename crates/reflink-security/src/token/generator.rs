//! SHA-256 referral token generator.

use base64::{engine::general_purpose::URL_SAFE, Engine};
use reflink_core::{Interface, UserId};
use sha2::{Digest, Sha256};
use shaku::Component;
use uuid::Uuid;

/// Produces referral tokens for a referring user.
pub trait TokenGenerator: Interface + Send + Sync {
    /// Generates a new URL-safe token bound to `user_id`.
    fn generate(&self, user_id: UserId) -> String;
}

/// Token generator hashing a secret, a random UUID and the user id.
///
/// Output is the URL-safe base64 encoding of the 32-byte digest, which is
/// always 44 characters long.
#[derive(Component, Clone)]
#[shaku(interface = TokenGenerator)]
pub struct Sha256TokenGenerator {
    secret: String,
}

impl Sha256TokenGenerator {
    /// Creates a generator using the configured secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    fn digest(&self, nonce: Uuid, user_id: UserId) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(nonce.to_string().as_bytes());
        hasher.update(user_id.to_string().as_bytes());
        URL_SAFE.encode(hasher.finalize())
    }
}

impl TokenGenerator for Sha256TokenGenerator {
    fn generate(&self, user_id: UserId) -> String {
        self.digest(Uuid::new_v4(), user_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_token_is_url_safe() {
        let generator = Sha256TokenGenerator::new("test-secret-value");
        let token = generator.generate(UserId::new(1));
        assert_eq!(token.len(), 44);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '='));
    }

    #[test]
    fn test_tokens_are_unique() {
        let generator = Sha256TokenGenerator::new("test-secret-value");
        let tokens: HashSet<_> = (0..500).map(|_| generator.generate(UserId::new(7))).collect();
        assert_eq!(tokens.len(), 500);
    }

    #[test]
    fn test_digest_depends_on_secret_and_user() {
        let nonce = Uuid::new_v4();
        let a = Sha256TokenGenerator::new("secret-a-secret-a");
        let b = Sha256TokenGenerator::new("secret-b-secret-b");

        assert_eq!(a.digest(nonce, UserId::new(1)), a.digest(nonce, UserId::new(1)));
        assert_ne!(a.digest(nonce, UserId::new(1)), b.digest(nonce, UserId::new(1)));
        assert_ne!(a.digest(nonce, UserId::new(1)), a.digest(nonce, UserId::new(2)));
    }
}
