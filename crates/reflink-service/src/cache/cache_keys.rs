//! Cache keys for the listing aggregates and the mapping from mutated
//! entities to the aggregates that must be refreshed.

use reflink_core::UserId;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "reflink:cache";

/// A cached listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Aggregate {
    AllUsers,
    AllLinks,
    AllPayments,
    PaymentsByUser(UserId),
}

impl Aggregate {
    /// Cache key holding this aggregate.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Self::AllUsers => format!("{}:all_users", CACHE_PREFIX),
            Self::AllLinks => format!("{}:all_links", CACHE_PREFIX),
            Self::AllPayments => format!("{}:all_payments", CACHE_PREFIX),
            Self::PaymentsByUser(id) => format!("{}:user_payments:{}", CACHE_PREFIX, id),
        }
    }

    /// Low-cardinality name used as a metrics label.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AllUsers => "all_users",
            Self::AllLinks => "all_links",
            Self::AllPayments => "all_payments",
            Self::PaymentsByUser(_) => "user_payments",
        }
    }
}

/// The kind of entity a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    User,
    Link,
    /// A payment owned by the given user.
    Payment { owner: UserId },
}

/// Aggregates that become stale when an entity of `kind` changes.
#[must_use]
pub fn dependents(kind: EntityKind) -> Vec<Aggregate> {
    match kind {
        EntityKind::User => vec![Aggregate::AllUsers],
        EntityKind::Link => vec![Aggregate::AllLinks],
        EntityKind::Payment { owner } => {
            vec![Aggregate::AllPayments, Aggregate::PaymentsByUser(owner)]
        }
    }
}
