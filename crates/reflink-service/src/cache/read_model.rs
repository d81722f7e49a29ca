//! Cache-aside read model for the listing aggregates.
//!
//! Reads are served from the cache when possible and repopulate it from the
//! store otherwise. Writes call [`AggregateCache::refresh`], which recomputes
//! every dependent aggregate from the store and overwrites its cache entry.
//! Cache failures never fail a request.

use super::cache_keys::{dependents, Aggregate, EntityKind};
use super::{CacheExt, CacheInterface, DEFAULT_TTL};
use crate::metrics::CacheMetrics;
use async_trait::async_trait;
use reflink_core::{Interface, Link, Payment, ReflinkResult, User, UserId};
use reflink_repository::{LinkRepository, PaymentRepository, UserRepository};
use serde::{de::DeserializeOwned, Serialize};
use shaku::Component;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Cached access to the listing aggregates.
#[async_trait]
pub trait AggregateCache: Interface + Send + Sync {
    /// All users, ordered by id.
    async fn users(&self) -> ReflinkResult<Vec<User>>;

    /// All links, ordered by id.
    async fn links(&self) -> ReflinkResult<Vec<Link>>;

    /// All payments, ordered by id.
    async fn payments(&self) -> ReflinkResult<Vec<Payment>>;

    /// Payments owned by one user, ordered by id.
    async fn payments_by_user(&self, user_id: UserId) -> ReflinkResult<Vec<Payment>>;

    /// Recomputes every aggregate that depends on `kind`.
    ///
    /// Failures are logged and leave the previous entry in place.
    async fn refresh(&self, kind: EntityKind);
}

/// Cache-aside orchestrator over the repositories.
#[derive(Component)]
#[shaku(interface = AggregateCache)]
pub struct ReadModelCache {
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    link_repository: Arc<dyn LinkRepository>,
    #[shaku(inject)]
    payment_repository: Arc<dyn PaymentRepository>,
    #[shaku(default = DEFAULT_TTL)]
    ttl: Duration,
}

impl ReadModelCache {
    /// Creates a read model with the given entry lifetime.
    #[must_use]
    pub fn new(
        cache: Arc<dyn CacheInterface>,
        user_repository: Arc<dyn UserRepository>,
        link_repository: Arc<dyn LinkRepository>,
        payment_repository: Arc<dyn PaymentRepository>,
        ttl: Duration,
    ) -> Self {
        Self {
            cache,
            user_repository,
            link_repository,
            payment_repository,
            ttl,
        }
    }

    async fn read_through<T, F, Fut>(&self, aggregate: Aggregate, load: F) -> ReflinkResult<Vec<T>>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = ReflinkResult<Vec<T>>> + Send,
    {
        let key = aggregate.key();

        match self.cache.get::<Vec<T>>(&key).await {
            Ok(Some(items)) => {
                record_lookup(aggregate, "hit");
                return Ok(items);
            }
            Ok(None) => {
                debug!("Aggregate '{}' not cached", key);
                record_lookup(aggregate, "miss");
            }
            Err(e) => {
                warn!("Ignoring unusable cache entry '{}': {}", key, e);
                record_lookup(aggregate, "error");
            }
        }

        let items = load().await?;
        self.store(&key, &items).await;
        Ok(items)
    }

    async fn store<T: Serialize + Send + Sync>(&self, key: &str, items: &[T]) {
        if let Err(e) = self.cache.set(key, items, self.ttl).await {
            warn!("Failed to cache '{}': {}", key, e);
        }
    }

    async fn recompute(&self, aggregate: Aggregate) -> ReflinkResult<()> {
        let key = aggregate.key();
        match aggregate {
            Aggregate::AllUsers => {
                let users = self.user_repository.find_all().await?;
                self.store(&key, &users).await;
            }
            Aggregate::AllLinks => {
                let links = self.link_repository.find_all().await?;
                self.store(&key, &links).await;
            }
            Aggregate::AllPayments => {
                let payments = self.payment_repository.find_all().await?;
                self.store(&key, &payments).await;
            }
            Aggregate::PaymentsByUser(user_id) => {
                let payments = self.payment_repository.find_by_user(user_id).await?;
                self.store(&key, &payments).await;
            }
        }
        debug!("Refreshed aggregate '{}'", key);
        Ok(())
    }
}

fn record_lookup(aggregate: Aggregate, result: &'static str) {
    CacheMetrics::lookup(aggregate.name(), result);
}

#[async_trait]
impl AggregateCache for ReadModelCache {
    async fn users(&self) -> ReflinkResult<Vec<User>> {
        self.read_through(Aggregate::AllUsers, || self.user_repository.find_all())
            .await
    }

    async fn links(&self) -> ReflinkResult<Vec<Link>> {
        self.read_through(Aggregate::AllLinks, || self.link_repository.find_all())
            .await
    }

    async fn payments(&self) -> ReflinkResult<Vec<Payment>> {
        self.read_through(Aggregate::AllPayments, || self.payment_repository.find_all())
            .await
    }

    async fn payments_by_user(&self, user_id: UserId) -> ReflinkResult<Vec<Payment>> {
        self.read_through(Aggregate::PaymentsByUser(user_id), || {
            self.payment_repository.find_by_user(user_id)
        })
        .await
    }

    async fn refresh(&self, kind: EntityKind) {
        for aggregate in dependents(kind) {
            if let Err(e) = self.recompute(aggregate).await {
                warn!(
                    "Could not refresh '{}', keeping previous entry: {}",
                    aggregate.key(),
                    e
                );
            }
        }
    }
}

impl std::fmt::Debug for ReadModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadModelCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
