//! Response Cache Middleware - caches HTTP responses keyed by request
//!
//! Derives a deterministic key per request, reads the response's `Cache-Control`
//! header to decide whether to store it, and replays stored responses with their
//! remaining lifetime. Ships an in-memory backend with TTL expiration and LRU eviction.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod tasks;

pub use api::{create_router, AppState};
pub use cache::{CacheBackend, MemoryBackend, SetOptions};
pub use config::{Config, Environment};
pub use error::{CacheError, CacheFailure};
pub use middleware::{intercept, CacheCallbacks, CacheOptions, ResponseCache};
pub use tasks::spawn_cleanup_task;
