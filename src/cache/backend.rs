//! Cache Backend Module
//!
//! The narrow capability the interception layer consumes. Storage, eviction and
//! replication are the backend's business.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CachedResponse;

/// Options for a single write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetOptions {
    /// Time to live in seconds
    pub ttl: u64,
}

impl SetOptions {
    pub fn with_ttl(ttl: u64) -> Self {
        Self { ttl }
    }
}

/// Key-value store holding cached responses with time-based expiry.
///
/// Every operation may fail; failures are returned as values and never panic through
/// the caller.
#[async_trait]
pub trait CacheBackend: Send + Sync {
    /// Retrieves the entry stored under `key`, `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<CachedResponse>>;

    /// Stores an entry that expires after `options.ttl` seconds.
    async fn set(&self, key: &str, value: CachedResponse, options: SetOptions) -> Result<()>;

    /// Whether [`ttl`](Self::ttl) reports real remaining lifetimes.
    fn supports_ttl(&self) -> bool {
        false
    }

    /// Remaining lifetime of `key` in seconds.
    ///
    /// Only consulted when [`supports_ttl`](Self::supports_ttl) returns true.
    async fn ttl(&self, _key: &str) -> Result<Option<u64>> {
        Ok(None)
    }

    /// Short identifier used in log lines.
    fn backend_type(&self) -> &str;
}
