//! Typed ID wrappers for domain entities.
//!
//! All persistent entities use 64-bit sequential keys; the wrappers exist so
//! a post id cannot be passed where a user id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

macro_rules! entity_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw database key.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the inner key.
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

entity_id! {
    /// A strongly-typed wrapper for user IDs.
    UserId
}

entity_id! {
    /// A strongly-typed wrapper for post IDs.
    PostId
}

entity_id! {
    /// A strongly-typed wrapper for comment IDs.
    CommentId
}

entity_id! {
    /// A strongly-typed wrapper for category IDs.
    CategoryId
}

entity_id! {
    /// A strongly-typed wrapper for notification IDs.
    NotificationId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_i64() {
        let id = UserId::new(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(UserId::from(42), id);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = PostId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
