//! Cache Module
//!
//! The cache capability consumed by the middleware, plus an in-memory implementation
//! with TTL expiration and LRU eviction.

mod backend;
mod entry;
mod lru;
mod memory;
mod stats;
mod store;


// Re-export public types
pub use backend::{CacheBackend, SetOptions};
pub use entry::StoreEntry;
pub use lru::LruTracker;
pub use memory::MemoryBackend;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// Maximum allowed key length in bytes; keys carry full paths and query strings
pub const MAX_KEY_LENGTH: usize = 2048;

/// Maximum allowed payload size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
