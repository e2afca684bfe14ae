//! Error types for the response cache
//!
//! Backend failures are reported as [`CacheError`]. The interception layer wraps them in a
//! [`CacheFailure`] naming the operation that failed, hands that to the `on_error` callback,
//! and then carries on as if the cache were absent.

use thiserror::Error;

// == Cache Error Enum ==
/// Error produced by a cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Key or payload rejected by the store
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    /// Store is full and eviction failed
    #[error("Cache full: {0}")]
    CacheFull(String),

    /// Stored payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend could not be reached or timed out
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

// == Cache Failure Enum ==
/// A contained failure of the interception layer, tagged with the operation that failed.
///
/// None of these ever reach the client; they surface only through `on_error` and
/// diagnostic logging.
#[derive(Error, Debug)]
pub enum CacheFailure {
    /// Reading an entry failed; the request is treated as a miss
    #[error("Error retrieving value from cache: {0}")]
    Read(#[source] CacheError),

    /// Persisting a response failed; the response was already delivered
    #[error("Error setting value in cache: {0}")]
    Write(#[source] CacheError),

    /// Reading the remaining TTL failed; the hit is replayed without Cache-Control
    #[error("Error retrieving ttl from cache: {0}")]
    Ttl(#[source] CacheError),

    /// A stored entry cannot be turned back into a response
    #[error("Error replaying cached response: {0}")]
    InvalidEntry(String),
}

// == Result Type Alias ==
/// Convenience Result type for cache backends.
pub type Result<T> = std::result::Result<T, CacheError>;
