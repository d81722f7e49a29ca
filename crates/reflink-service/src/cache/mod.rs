//! Caching infrastructure for the service layer.
//!
//! Listing aggregates are served cache-aside through [`ReadModelCache`],
//! backed by Redis or by an in-process map when Redis is disabled.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod read_model;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use cache_keys::{Aggregate, EntityKind};
pub use memory_cache::InMemoryCache;
pub use read_model::{AggregateCache, ReadModelCache, ReadModelCacheParameters};
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters, DEFAULT_TTL};
