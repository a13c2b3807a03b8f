//! Read-through cache for user lookups.

use super::{cache_keys, CacheExt, CacheInterface};
use quill_core::{QuillError, QuillResult, User, UserId};
use quill_repository::UserRepository;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default TTL for cached users (1 minute).
pub const DEFAULT_USER_TTL: Duration = Duration::from_secs(60);

/// Read-through cache in front of the durable user store.
///
/// Cache trouble never fails a read: an unavailable or misbehaving cache
/// degrades to a durable fetch. Only `NotFound` and durable-store errors
/// cross this boundary.
pub struct UserCache {
    cache: Arc<dyn CacheInterface>,
    users: Arc<dyn UserRepository>,
    ttl: Duration,
}

impl UserCache {
    #[must_use]
    pub fn new(cache: Arc<dyn CacheInterface>, users: Arc<dyn UserRepository>) -> Self {
        Self {
            cache,
            users,
            ttl: DEFAULT_USER_TTL,
        }
    }

    #[must_use]
    pub fn with_ttl(
        cache: Arc<dyn CacheInterface>,
        users: Arc<dyn UserRepository>,
        ttl: Duration,
    ) -> Self {
        Self { cache, users, ttl }
    }

    /// Looks up a user, consulting the cache first.
    ///
    /// On a miss the durable row is fetched and the cache is populated
    /// best-effort. A missing row is `NotFound` regardless of cache state.
    pub async fn get(&self, id: UserId) -> QuillResult<User> {
        let key = cache_keys::user_by_id(id);

        match self.cache.get::<User>(&key).await {
            Ok(Some(user)) => {
                debug!("User {} served from cache", id);
                return Ok(user);
            }
            Ok(None) => {}
            Err(QuillError::CacheUnavailable) => {}
            Err(e) => {
                warn!("Cache read failed for user {}: {}; falling back", id, e);
            }
        }

        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| QuillError::not_found("User", id))?;

        match self.cache.set(&key, &user, self.ttl).await {
            Ok(()) | Err(QuillError::CacheUnavailable) => {}
            Err(e) => warn!("Failed to cache user {}: {}", id, e),
        }

        Ok(user)
    }

    /// Drops the user's cache entry after a durable mutation.
    ///
    /// The durable write already succeeded, so failures here are logged and
    /// swallowed; the entry expires on its own within the TTL.
    pub async fn invalidate(&self, id: UserId) {
        let key = cache_keys::user_by_id(id);
        match self.cache.delete(&key).await {
            Ok(deleted) => debug!("Invalidated cache for user {}: {}", id, deleted),
            Err(QuillError::CacheUnavailable) => {}
            Err(e) => warn!("Failed to invalidate cache for user {}: {}", id, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{MemoryCacheService, RedisCacheService};
    use quill_repository::InMemoryUserRepository;

    fn seeded_repo(id: i64) -> Arc<InMemoryUserRepository> {
        let repo = Arc::new(InMemoryUserRepository::new());
        let mut user = User::new(
            format!("user{id}"),
            format!("user{id}@example.com"),
            format!("User {id}"),
            "hash".into(),
        );
        user.id = UserId::new(id);
        repo.insert(user);
        repo
    }

    #[tokio::test]
    async fn second_get_is_served_from_cache() {
        let repo = seeded_repo(42);
        let cache = UserCache::new(Arc::new(MemoryCacheService::new()), repo.clone());

        let first = cache.get(UserId::new(42)).await.unwrap();
        let second = cache.get(UserId::new(42)).await.unwrap();

        // The hash is stripped before caching, everything else round-trips.
        assert_eq!(first.id, second.id);
        assert_eq!(first.username, second.username);
        assert_eq!(second.password_hash, "");
        assert_eq!(repo.find_by_id_calls(), 1);
    }

    #[tokio::test]
    async fn disabled_cache_degrades_to_durable_fetch() {
        let repo = seeded_repo(42);
        let cache = UserCache::new(Arc::new(RedisCacheService::disabled()), repo.clone());

        cache.get(UserId::new(42)).await.unwrap();
        cache.get(UserId::new(42)).await.unwrap();

        // Every read reaches the durable store; none fails.
        assert_eq!(repo.find_by_id_calls(), 2);
    }

    #[tokio::test]
    async fn missing_user_is_not_found() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let cache = UserCache::new(Arc::new(MemoryCacheService::new()), repo);

        let err = cache.get(UserId::new(999)).await.unwrap_err();
        assert!(matches!(err, QuillError::NotFound { .. }));
    }

    #[tokio::test]
    async fn invalidate_forces_fresh_read() {
        let repo = seeded_repo(42);
        let cache = UserCache::new(Arc::new(MemoryCacheService::new()), repo.clone());

        let stale = cache.get(UserId::new(42)).await.unwrap();

        let mut updated = stale.clone();
        updated.name = "Renamed".into();
        repo.update(&updated).await.unwrap();
        cache.invalidate(UserId::new(42)).await;

        let fresh = cache.get(UserId::new(42)).await.unwrap();
        assert_eq!(fresh.name, "Renamed");
    }

    #[tokio::test]
    async fn invalidate_with_disabled_cache_is_silent() {
        let repo = seeded_repo(42);
        let cache = UserCache::new(Arc::new(RedisCacheService::disabled()), repo);
        cache.invalidate(UserId::new(42)).await;
    }
}
