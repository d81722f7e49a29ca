//! Typed ID wrappers for domain entities.
//!
//! Identifiers are assigned by the store on insert, so each wrapper holds the
//! row id as an `i64`.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw store id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw store id.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

store_id!(
    /// A strongly-typed wrapper for user IDs.
    UserId
);

store_id!(
    /// A strongly-typed wrapper for link IDs.
    LinkId
);

store_id!(
    /// A strongly-typed wrapper for payment IDs.
    PaymentId
);

impl UserId {
    /// Maps the zero sentinel used by clients for "no referrer" to `None`.
    #[must_use]
    pub const fn non_zero(id: i64) -> Option<Self> {
        if id == 0 {
            None
        } else {
            Some(Self(id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(UserId::new(42).to_string(), "42");
        assert_eq!(LinkId::from(7).to_string(), "7");
    }

    #[test]
    fn test_id_serializes_transparently() {
        let json = serde_json::to_string(&PaymentId::new(3)).unwrap();
        assert_eq!(json, "3");
        let id: UserId = serde_json::from_str("12").unwrap();
        assert_eq!(id, UserId::new(12));
    }

    #[test]
    fn test_zero_user_id_means_absent() {
        assert_eq!(UserId::non_zero(0), None);
        assert_eq!(UserId::non_zero(5), Some(UserId::new(5)));
    }
}
