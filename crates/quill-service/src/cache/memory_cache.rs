//! In-memory cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use parking_lot::Mutex;
use quill_core::QuillResult;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// In-memory cache backed by a HashMap with per-entry expiry.
///
/// Used by tests in place of Redis; honors TTLs so expiry behavior can be
/// exercised without a running server.
#[derive(Default)]
pub struct MemoryCacheService {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCacheService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (non-expired) entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .values()
            .filter(|(_, expires_at)| *expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for MemoryCacheService {
    fn is_enabled(&self) -> bool {
        true
    }

    async fn get_raw(&self, key: &str) -> QuillResult<Option<String>> {
        let mut entries = self.entries.lock();
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> QuillResult<()> {
        self.entries
            .lock()
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> QuillResult<bool> {
        Ok(self.entries.lock().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;

    #[tokio::test]
    async fn set_get_delete_round_trip() {
        let cache = MemoryCacheService::new();

        cache
            .set("k", &"value".to_string(), Duration::from_secs(60))
            .await
            .unwrap();
        let got: Option<String> = cache.get("k").await.unwrap();
        assert_eq!(got.as_deref(), Some("value"));

        assert!(cache.delete("k").await.unwrap());
        assert!(!cache.delete("k").await.unwrap());
        let got: Option<String> = cache.get("k").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn expired_entries_read_as_misses() {
        let cache = MemoryCacheService::new();
        cache
            .set_raw("k", "v", Duration::from_nanos(1))
            .await
            .unwrap();
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get_raw("k").await.unwrap().is_none());
    }
}
