//! Middleware options
//!
//! Supplied once when the cache layer is built and read-only afterwards.

use std::collections::BTreeMap;

use crate::middleware::CacheCallbacks;

/// Key shaping and instrumentation settings.
#[derive(Debug, Clone, Default)]
pub struct CacheOptions {
    /// Namespace prepended to every key
    pub prefix: Option<String>,
    /// Request headers whose values vary the key
    pub headers: Option<Vec<String>>,
    /// Query parameter values used when a request omits the parameter
    pub defaults: BTreeMap<String, String>,
    /// Instrumentation hooks
    pub callbacks: CacheCallbacks,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key namespace; a trailing `:` is added when missing.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Sets the request headers that vary the key.
    pub fn vary_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.headers = Some(headers.into_iter().map(Into::into).collect());
        self
    }

    /// Adds a default for a query parameter.
    pub fn default_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.defaults.insert(name.into(), value.to_string());
        self
    }

    pub fn callbacks(mut self, callbacks: CacheCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }
}
