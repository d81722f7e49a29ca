//! In-memory collaborators and mocks shared by the service tests.

#![allow(dead_code)]

use crate::cache::CacheInterface;
use async_trait::async_trait;
use chrono::Utc;
use reflink_core::{
    Link, LinkId, NewLink, NewPayment, NewUser, Payment, PaymentId, PaymentPatch, ReflinkError,
    ReflinkResult, User, UserId,
};
use reflink_repository::{LinkRepository, PaymentRepository, UserRepository};
use reflink_security::{PasswordHasherInterface, TokenGenerator};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub fn user(id: i64, email: &str) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(id),
        first_name: "Test".to_string(),
        second_name: "Middle".to_string(),
        last_name: "User".to_string(),
        email: email.to_string(),
        password_hash: "hashed".to_string(),
        phone: "+14155552671".to_string(),
        role: "customer".to_string(),
        referrer_id: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn link(id: i64, token: &str, limit: i64) -> Link {
    let now = Utc::now();
    Link {
        id: LinkId::new(id),
        token: token.to_string(),
        referrer_id: UserId::new(1),
        count: 0,
        enabled: true,
        limit,
        created_at: now,
        updated_at: now,
    }
}

// =============================================================================
// Repositories
// =============================================================================

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<BTreeMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.users.lock().unwrap().insert(user.id, user);
        }
        repo
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save(&self, user: NewUser) -> ReflinkResult<User> {
        let mut users = self.users.lock().unwrap();
        let id = UserId::new(users.keys().last().map_or(1, |id| id.into_inner() + 1));
        let now = Utc::now();
        let saved = User {
            id,
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
        };
        users.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: UserId) -> ReflinkResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> ReflinkResult<Vec<User>> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }
}

#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<BTreeMap<LinkId, Link>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_links(links: Vec<Link>) -> Self {
        let repo = Self::new();
        for link in links {
            repo.insert(link);
        }
        repo
    }

    pub fn insert(&self, link: Link) {
        self.links.lock().unwrap().insert(link.id, link);
    }

    pub fn get(&self, token: &str) -> Option<Link> {
        self.links
            .lock()
            .unwrap()
            .values()
            .find(|l| l.token == token)
            .cloned()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn save(&self, link: NewLink) -> ReflinkResult<Link> {
        let mut links = self.links.lock().unwrap();
        if links.values().any(|l| l.token == link.token) {
            return Err(ReflinkError::conflict("UNIQUE constraint failed: links.token"));
        }
        let id = LinkId::new(links.keys().last().map_or(1, |id| id.into_inner() + 1));
        let now = Utc::now();
        let saved = Link {
            id,
            token: link.token,
            referrer_id: link.referrer_id,
            count: 0,
            enabled: true,
            limit: link.limit,
            created_at: now,
            updated_at: now,
        };
        links.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_token(&self, token: &str) -> ReflinkResult<Option<Link>> {
        Ok(self.get(token))
    }

    async fn find_all(&self) -> ReflinkResult<Vec<Link>> {
        Ok(self.links.lock().unwrap().values().cloned().collect())
    }

    async fn try_redeem(&self, id: LinkId) -> ReflinkResult<bool> {
        let mut links = self.links.lock().unwrap();
        match links.get_mut(&id) {
            Some(link) if link.can_redeem() => {
                link.count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn release_redemption(&self, id: LinkId) -> ReflinkResult<bool> {
        let mut links = self.links.lock().unwrap();
        match links.get_mut(&id) {
            Some(link) if link.count > 0 => {
                link.count -= 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn set_enabled(&self, id: LinkId, enabled: bool) -> ReflinkResult<bool> {
        let mut links = self.links.lock().unwrap();
        match links.get_mut(&id) {
            Some(link) => {
                link.enabled = enabled;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: Mutex<BTreeMap<PaymentId, Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn save(&self, payment: NewPayment) -> ReflinkResult<Payment> {
        let mut payments = self.payments.lock().unwrap();
        let id = PaymentId::new(payments.keys().last().map_or(1, |id| id.into_inner() + 1));
        let now = Utc::now();
        let saved = Payment {
            id,
            user_id: payment.user_id,
            amount: payment.amount,
            description: payment.description,
            status: payment.status,
            user: None,
            created_at: now,
            updated_at: now,
        };
        payments.insert(id, saved.clone());
        Ok(saved)
    }

    async fn find_by_id(&self, id: PaymentId) -> ReflinkResult<Option<Payment>> {
        Ok(self.payments.lock().unwrap().get(&id).cloned())
    }

    async fn find_all(&self) -> ReflinkResult<Vec<Payment>> {
        Ok(self.payments.lock().unwrap().values().cloned().collect())
    }

    async fn find_by_user(&self, user_id: UserId) -> ReflinkResult<Vec<Payment>> {
        Ok(self
            .payments
            .lock()
            .unwrap()
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn apply_patch(&self, id: PaymentId, patch: PaymentPatch) -> ReflinkResult<Option<Payment>> {
        let mut payments = self.payments.lock().unwrap();
        Ok(payments.get_mut(&id).map(|payment| {
            patch.apply_to(payment);
            payment.clone()
        }))
    }
}

// =============================================================================
// Security collaborators
// =============================================================================

/// Hasher that tags the password instead of running Argon2.
pub struct PlainHasher;

impl PasswordHasherInterface for PlainHasher {
    fn hash(&self, password: &str) -> ReflinkResult<String> {
        Ok(format!("hashed:{password}"))
    }
}

/// Generator returning `token-1`, `token-2`, ...
#[derive(Default)]
pub struct SequentialTokens {
    next: AtomicU64,
}

impl TokenGenerator for SequentialTokens {
    fn generate(&self, _user_id: UserId) -> String {
        format!("token-{}", self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Generator that always returns the same token.
pub struct FixedToken(pub &'static str);

impl TokenGenerator for FixedToken {
    fn generate(&self, _user_id: UserId) -> String {
        self.0.to_string()
    }
}

// =============================================================================
// Mocks
// =============================================================================

mockall::mock! {
    pub Cache {}

    #[async_trait]
    impl CacheInterface for Cache {
        async fn get_raw(&self, key: &str) -> ReflinkResult<Option<String>>;
        async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ReflinkResult<()>;
        async fn delete(&self, key: &str) -> ReflinkResult<bool>;
        fn is_enabled(&self) -> bool;
    }
}

mockall::mock! {
    pub LinkRepo {}

    #[async_trait]
    impl LinkRepository for LinkRepo {
        async fn save(&self, link: NewLink) -> ReflinkResult<Link>;
        async fn find_by_token(&self, token: &str) -> ReflinkResult<Option<Link>>;
        async fn find_all(&self) -> ReflinkResult<Vec<Link>>;
        async fn try_redeem(&self, id: LinkId) -> ReflinkResult<bool>;
        async fn release_redemption(&self, id: LinkId) -> ReflinkResult<bool>;
        async fn set_enabled(&self, id: LinkId, enabled: bool) -> ReflinkResult<bool>;
    }
}

mockall::mock! {
    pub UserRepo {}

    #[async_trait]
    impl UserRepository for UserRepo {
        async fn save(&self, user: NewUser) -> ReflinkResult<User>;
        async fn find_by_id(&self, id: UserId) -> ReflinkResult<Option<User>>;
        async fn find_all(&self) -> ReflinkResult<Vec<User>>;
    }
}
