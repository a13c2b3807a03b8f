//! Caching layer: interface, Redis and in-memory backends, key naming, and
//! the user read-through cache.

pub mod cache_interface;
pub mod cache_keys;
pub mod memory_cache;
pub mod redis_cache;
pub mod user_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::MemoryCacheService;
pub use redis_cache::{RedisCacheService, RedisCacheServiceParameters};
pub use user_cache::{UserCache, DEFAULT_USER_TTL};
