//! Instrumentation hooks
//!
//! Optional observers of the cache decision flow. Every hook runs fire-and-forget: a
//! panicking hook is logged and otherwise ignored, so it can never break a request.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use crate::error::CacheFailure;
use crate::models::CachedResponse;

type KeyHook = Arc<dyn Fn(&str) + Send + Sync>;
type HitHook = Arc<dyn Fn(&str, &CachedResponse) + Send + Sync>;
type ErrorHook = Arc<dyn Fn(&CacheFailure, &str) + Send + Sync>;

/// The four optional hooks: attempt, hit, miss and error.
#[derive(Clone, Default)]
pub struct CacheCallbacks {
    on_attempt: Option<KeyHook>,
    on_hit: Option<HitHook>,
    on_miss: Option<KeyHook>,
    on_error: Option<ErrorHook>,
}

impl CacheCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called with the derived key before every cache read.
    pub fn on_attempt(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_attempt = Some(Arc::new(hook));
        self
    }

    /// Called with the key and the stored entry when a request is served from cache.
    pub fn on_hit(
        mut self,
        hook: impl Fn(&str, &CachedResponse) + Send + Sync + 'static,
    ) -> Self {
        self.on_hit = Some(Arc::new(hook));
        self
    }

    /// Called with the key when the request has to reach the handler.
    pub fn on_miss(mut self, hook: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_miss = Some(Arc::new(hook));
        self
    }

    /// Called when a cache read, write or TTL lookup fails.
    pub fn on_error(
        mut self,
        hook: impl Fn(&CacheFailure, &str) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(hook));
        self
    }

    pub(crate) fn attempt(&self, key: &str) {
        if let Some(hook) = &self.on_attempt {
            guarded("on_attempt", || hook(key));
        }
    }

    pub(crate) fn hit(&self, key: &str, value: &CachedResponse) {
        if let Some(hook) = &self.on_hit {
            guarded("on_hit", || hook(key, value));
        }
    }

    pub(crate) fn miss(&self, key: &str) {
        if let Some(hook) = &self.on_miss {
            guarded("on_miss", || hook(key));
        }
    }

    pub(crate) fn error(&self, failure: &CacheFailure, key: &str) {
        if let Some(hook) = &self.on_error {
            guarded("on_error", || hook(failure, key));
        }
    }
}

impl fmt::Debug for CacheCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheCallbacks")
            .field("on_attempt", &self.on_attempt.is_some())
            .field("on_hit", &self.on_hit.is_some())
            .field("on_miss", &self.on_miss.is_some())
            .field("on_error", &self.on_error.is_some())
            .finish()
    }
}

/// Runs a hook, swallowing any panic it raises.
fn guarded(name: &str, hook: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(hook)).is_err() {
        warn!(callback = name, "Cache callback panicked; ignoring");
    }
}
