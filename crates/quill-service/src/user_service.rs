//! User service: cached lookups and profile mutation.

use crate::cache::{CacheInterface, UserCache, DEFAULT_USER_TTL};
use crate::dto::{UpdateProfileRequest, UserResponse};
use async_trait::async_trait;
use quill_core::{Interface, QuillError, QuillResult, User, UserId};
use quill_repository::UserRepository;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use validator::Validate;

/// User lookups and profile mutation.
///
/// Reads go through the user cache; profile updates hit the durable store
/// and then invalidate, never the other way around.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Fetches a user through the cache.
    async fn get_user(&self, id: UserId) -> QuillResult<UserResponse>;

    /// Fetches the full user entity through the cache.
    ///
    /// Used by the auth middleware, which needs the role rather than the
    /// public projection.
    async fn resolve_user(&self, id: UserId) -> QuillResult<User>;

    /// Updates the user's profile and invalidates their cache entry.
    async fn update_profile(
        &self,
        id: UserId,
        request: UpdateProfileRequest,
    ) -> QuillResult<UserResponse>;
}

/// Concrete user service for Shaku DI.
#[derive(Component)]
#[shaku(interface = UserService)]
pub struct UserServiceComponent {
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(inject)]
    users: Arc<dyn UserRepository>,
    #[shaku(default = DEFAULT_USER_TTL)]
    user_ttl: Duration,
}

impl UserServiceComponent {
    #[must_use]
    pub fn new(
        cache: Arc<dyn CacheInterface>,
        users: Arc<dyn UserRepository>,
        user_ttl: Duration,
    ) -> Self {
        Self {
            cache,
            users,
            user_ttl,
        }
    }

    fn user_cache(&self) -> UserCache {
        UserCache::with_ttl(
            Arc::clone(&self.cache),
            Arc::clone(&self.users),
            self.user_ttl,
        )
    }
}

#[async_trait]
impl UserService for UserServiceComponent {
    async fn get_user(&self, id: UserId) -> QuillResult<UserResponse> {
        debug!("Getting user: {}", id);
        let user = self.user_cache().get(id).await?;
        Ok(UserResponse::from(user))
    }

    async fn resolve_user(&self, id: UserId) -> QuillResult<User> {
        self.user_cache().get(id).await
    }

    async fn update_profile(
        &self,
        id: UserId,
        request: UpdateProfileRequest,
    ) -> QuillResult<UserResponse> {
        debug!("Updating profile for user: {}", id);

        request.validate()?;

        let mut user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| QuillError::not_found("User", id))?;

        if let Some(name) = request.name {
            user.name = name;
        }
        if let Some(bio) = request.bio {
            user.bio = Some(bio);
        }
        if let Some(picture) = request.profile_picture {
            user.profile_picture = Some(picture);
        }

        let rows = self.users.update(&user).await?;
        if rows == 0 {
            return Err(QuillError::not_found("User", id));
        }

        // Durable write succeeded; drop the stale cache entry.
        self.user_cache().invalidate(id).await;

        info!("Profile updated for user: {}", id);
        Ok(UserResponse::from(user))
    }
}

impl std::fmt::Debug for UserServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserServiceComponent").finish_non_exhaustive()
    }
}
