//! Cache key generators for consistent key naming.

use quill_core::UserId;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "quill:cache";

/// Generate a cache key for a user by ID.
#[must_use]
pub fn user_by_id(id: UserId) -> String {
    format!("{}:user:id:{}", CACHE_PREFIX, id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_by_id_key() {
        assert_eq!(user_by_id(UserId::new(42)), "quill:cache:user:id:42");
    }
}
