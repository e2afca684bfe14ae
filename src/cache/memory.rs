//! In-memory backend
//!
//! Shares a [`CacheStore`] behind an async RwLock and keeps cached responses as JSON
//! payloads, the way a remote key-value store would hold them.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::cache::{CacheBackend, CacheStats, CacheStore, SetOptions};
use crate::error::Result;
use crate::models::CachedResponse;

// == Memory Backend ==
/// [`CacheBackend`] over a process-local [`CacheStore`].
///
/// Cloning is cheap and every clone sees the same store.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: Arc<RwLock<CacheStore>>,
}

impl MemoryBackend {
    /// Creates a backend with its own store.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of cached responses
    /// * `default_ttl` - TTL in seconds for writes that carry none
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self::from_store(CacheStore::new(max_entries, default_ttl))
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a snapshot of the store counters.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    /// Drops every expired entry and returns how many were removed.
    pub async fn cleanup_expired(&self) -> usize {
        self.store.write().await.cleanup_expired()
    }
}

#[async_trait]
impl CacheBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>> {
        // Write lock: reads update LRU order and may drop an expired entry
        let payload = self.store.write().await.get(key);

        match payload {
            Some(payload) => Ok(Some(serde_json::from_str(&payload)?)),
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: CachedResponse, options: SetOptions) -> Result<()> {
        let payload = serde_json::to_string(&value)?;
        self.store
            .write()
            .await
            .set(key.to_string(), payload, Some(options.ttl))?;

        debug!(key = %key, ttl = options.ttl, "Stored response in memory cache");
        Ok(())
    }

    fn supports_ttl(&self) -> bool {
        true
    }

    async fn ttl(&self, key: &str) -> Result<Option<u64>> {
        Ok(self.store.read().await.ttl(key))
    }

    fn backend_type(&self) -> &str {
        "memory"
    }
}
