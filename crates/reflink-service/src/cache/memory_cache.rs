//! In-process cache used when Redis is disabled.

use super::CacheInterface;
use async_trait::async_trait;
use moka::{future::Cache, Expiry};
use reflink_core::ReflinkResult;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::debug;

/// Upper bound on stored entries for the default cache.
pub const DEFAULT_MAX_ENTRIES: u64 = 10_000;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    ttl: Duration,
}

/// Expires each entry after the TTL it was written with.
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(entry.ttl)
    }
}

/// Size-bounded expiring key/value store backed by `moka`.
///
/// Expired entries are dropped by the cache's housekeeping, so keys that are
/// never read again do not accumulate.
#[derive(Clone)]
pub struct InMemoryCache {
    entries: Cache<String, Entry>,
}

impl InMemoryCache {
    /// Creates a cache bounded to [`DEFAULT_MAX_ENTRIES`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ENTRIES)
    }

    /// Creates a cache holding at most `max_entries` entries.
    #[must_use]
    pub fn with_capacity(max_entries: u64) -> Self {
        let entries = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { entries }
    }

    /// Number of stored entries after pending evictions have run.
    pub async fn entry_count(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryCache")
            .field("entry_count", &self.entries.entry_count())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CacheInterface for InMemoryCache {
    async fn get_raw(&self, key: &str) -> ReflinkResult<Option<String>> {
        Ok(self.entries.get(key).await.map(|entry| entry.value))
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> ReflinkResult<()> {
        self.entries
            .insert(
                key.to_string(),
                Entry {
                    value: value.to_string(),
                    ttl,
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> ReflinkResult<bool> {
        let removed = self.entries.remove(key).await.is_some();
        if removed {
            debug!("Removed key '{}'", key);
        }
        Ok(removed)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}
