//! Response caching middleware
//!
//! Three pieces wired together per request:
//! - [`derive_key`] turns a request into its cache key
//! - [`derive_policy`] reads a response's Cache-Control header into a [`CachePolicy`]
//! - [`ResponseCache`] replays hits and stores cacheable misses
//!
//! Mount it with `axum::middleware::from_fn_with_state(cache, intercept)`.

mod callbacks;
mod controller;
mod interceptor;
mod key;
mod options;
mod policy;

#[cfg(test)]
mod property_tests;

pub use callbacks::CacheCallbacks;
pub use controller::{intercept, ResponseCache};
pub use interceptor::{PendingWrite, ResponseInterceptor};
pub use key::derive_key;
pub use options::CacheOptions;
pub use policy::{cache_control_value, derive_policy, policy_from_headers, CachePolicy};
