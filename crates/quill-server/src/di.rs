//! Dependency injection module using Shaku.
//!
//! Wires the durable stores, security components, cache, and business
//! services into a single module. The notification hub is process-wide
//! state shared with the SSE endpoint, so it is passed in as a component
//! parameter rather than constructed by the container.

use quill_config::AppConfig;
use quill_core::{QuillError, QuillResult};
use quill_realtime::NotificationHub;
use quill_repository::{
    DatabasePool, DatabasePoolParameters, PgCategoryRepository, PgCommentRepository,
    PgNotificationRepository, PgPostLikeRepository, PgPostRepository, PgUserRepository,
};
use quill_security::{PasswordHasher, TokenProvider, TokenProviderParameters};
use quill_service::{
    AuthServiceComponent, CategoryServiceComponent, NotificationServiceComponent,
    NotificationServiceComponentParameters, PostServiceComponent, RedisCacheService,
    RedisCacheServiceParameters, UserServiceComponent, UserServiceComponentParameters,
};
use shaku::module;
use std::sync::Arc;

module! {
    pub AppModule {
        components = [
            DatabasePool,
            PasswordHasher,
            TokenProvider,
            PgUserRepository,
            PgPostRepository,
            PgCommentRepository,
            PgPostLikeRepository,
            PgCategoryRepository,
            PgNotificationRepository,
            RedisCacheService,
            UserServiceComponent,
            AuthServiceComponent,
            PostServiceComponent,
            CategoryServiceComponent,
            NotificationServiceComponent,
        ],
        providers = [],
    }
}

/// Builds the application module with all dependencies.
///
/// Connects the database pool, creates the Redis pool when caching is
/// enabled, and hands both to the container along with the shared hub.
pub async fn build_app_module(
    config: &AppConfig,
    hub: Arc<NotificationHub>,
) -> QuillResult<Arc<AppModule>> {
    let db_pool = DatabasePool::connect(&config.database).await?;

    let cache_pool = if config.redis.enabled {
        let redis_cfg = deadpool_redis::Config::from_url(&config.redis.url);
        let pool = redis_cfg
            .create_pool(Some(deadpool_redis::Runtime::Tokio1))
            .map_err(|e| QuillError::Cache(format!("Failed to create Redis pool: {e}")))?;
        Some(Arc::new(pool))
    } else {
        None
    };

    let token_provider = TokenProvider::new(&config.security);

    let module = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: db_pool.inner().clone(),
        })
        .with_component_parameters::<RedisCacheService>(RedisCacheServiceParameters {
            pool: cache_pool,
        })
        .with_component_parameters::<TokenProvider>(TokenProviderParameters {
            encoding_key: token_provider.encoding_key().clone(),
            decoding_key: token_provider.decoding_key().clone(),
            validation: token_provider.validation().clone(),
            issuer: token_provider.issuer().to_string(),
            audience: token_provider.audience().to_string(),
            expiration_secs: config.security.jwt_expiration_secs,
        })
        .with_component_parameters::<UserServiceComponent>(UserServiceComponentParameters {
            user_ttl: config.redis.user_ttl(),
        })
        .with_component_parameters::<NotificationServiceComponent>(
            NotificationServiceComponentParameters { hub },
        )
        .build();

    Ok(Arc::new(module))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_repository::{
        CategoryRepository, CommentRepository, DatabasePoolInterface, NotificationRepository,
        PostLikeRepository, PostRepository, UserRepository,
    };
    use quill_security::{PasswordHasherInterface, TokenProviderInterface};
    use quill_service::{
        AuthService, CacheInterface, CategoryService, NotificationService, PostService,
        UserService,
    };
    use shaku::{HasComponent, Interface};

    #[test]
    fn module_provides_all_components() {
        fn assert_has<M, C: Interface + ?Sized>()
        where
            M: HasComponent<C>,
        {
        }

        assert_has::<AppModule, dyn DatabasePoolInterface>();
        assert_has::<AppModule, dyn UserRepository>();
        assert_has::<AppModule, dyn PostRepository>();
        assert_has::<AppModule, dyn CommentRepository>();
        assert_has::<AppModule, dyn PostLikeRepository>();
        assert_has::<AppModule, dyn CategoryRepository>();
        assert_has::<AppModule, dyn NotificationRepository>();
        assert_has::<AppModule, dyn CacheInterface>();
        assert_has::<AppModule, dyn PasswordHasherInterface>();
        assert_has::<AppModule, dyn TokenProviderInterface>();
        assert_has::<AppModule, dyn UserService>();
        assert_has::<AppModule, dyn AuthService>();
        assert_has::<AppModule, dyn PostService>();
        assert_has::<AppModule, dyn CategoryService>();
        assert_has::<AppModule, dyn NotificationService>();
    }
}
