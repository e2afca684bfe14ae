//! Interception controller
//!
//! Per request: derive the key, try the cache, and either replay the stored response or
//! let the handler run behind a [`ResponseInterceptor`] and store what it wrote.
//!
//! The cache never decides whether a request succeeds. Backend errors become misses or
//! missing headers, and a backend that panics during lookup sends the request straight
//! to the handler.

use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{Html, IntoResponse, Json, Response};
use futures::FutureExt;
use tracing::{debug, warn};

use crate::cache::CacheBackend;
use crate::config::Environment;
use crate::error::CacheFailure;
use crate::middleware::interceptor::{PendingWrite, ResponseInterceptor};
use crate::middleware::key::derive_key;
use crate::middleware::policy::cache_control_value;
use crate::middleware::CacheOptions;
use crate::models::{CachedResponse, RequestDescriptor};

// == Response Cache ==
/// The caching layer: a backend plus the options, built once by the host and cloned
/// into every request.
#[derive(Clone)]
pub struct ResponseCache {
    backend: Option<Arc<dyn CacheBackend>>,
    options: Arc<CacheOptions>,
    environment: Environment,
}

impl ResponseCache {
    /// Creates a caching layer over `backend`.
    pub fn new(backend: Arc<dyn CacheBackend>, options: CacheOptions) -> Self {
        Self {
            backend: Some(backend),
            options: Arc::new(options),
            environment: Environment::default(),
        }
    }

    /// Creates a layer with no backend; every request goes straight to the handler.
    pub fn passthrough(options: CacheOptions) -> Self {
        Self {
            backend: None,
            options: Arc::new(options),
            environment: Environment::default(),
        }
    }

    /// Sets the environment; production silences diagnostics for contained failures.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Derives the cache key this layer uses for `request`.
    pub fn key_for(&self, request: &RequestDescriptor) -> String {
        derive_key(request, &self.options)
    }

    // == Handle ==
    /// Runs the cache decision flow for one request.
    pub async fn handle(&self, request: Request, next: Next) -> Response {
        let Some(backend) = self.backend.clone() else {
            return next.run(request).await;
        };

        let key = self.key_for(&RequestDescriptor::from(&request));

        let lookup = AssertUnwindSafe(self.serve_from_cache(backend.as_ref(), &key))
            .catch_unwind()
            .await;

        match lookup {
            Ok(Some(response)) => response,
            Ok(None) => self.serve_miss(backend, key, request, next).await,
            Err(_) => {
                self.diagnose(&"cache backend panicked during lookup", &key);
                next.run(request).await
            }
        }
    }

    // == Lookup / Hit ==
    /// Returns the replayed response on a hit, `None` on a miss or a failed read.
    async fn serve_from_cache(&self, backend: &dyn CacheBackend, key: &str) -> Option<Response> {
        let callbacks = &self.options.callbacks;
        callbacks.attempt(key);

        let entry = match backend.get(key).await {
            Ok(entry) => entry?,
            Err(err) => {
                self.report(CacheFailure::Read(err), key);
                return None;
            }
        };

        callbacks.hit(key, &entry);
        let ttl = self.remaining_ttl(backend, key).await;

        match replay(&entry, ttl) {
            Ok(response) => {
                debug!(key = %key, ttl = ?ttl, "Serving response from cache");
                Some(response)
            }
            Err(failure) => {
                self.report(failure, key);
                None
            }
        }
    }

    /// Remaining lifetime to advertise; `None` when the backend cannot say or fails.
    async fn remaining_ttl(&self, backend: &dyn CacheBackend, key: &str) -> Option<u64> {
        if !backend.supports_ttl() {
            return None;
        }

        match backend.ttl(key).await {
            Ok(ttl) => ttl.filter(|seconds| *seconds > 0),
            Err(err) => {
                self.diagnose(&CacheFailure::Ttl(err), key);
                None
            }
        }
    }

    // == Miss ==
    /// Runs the handler and returns its response as soon as it is ready. A cacheable
    /// response is written to the backend on a detached task, so a slow store never
    /// holds the caller.
    async fn serve_miss(
        &self,
        backend: Arc<dyn CacheBackend>,
        key: String,
        request: Request,
        next: Next,
    ) -> Response {
        self.options.callbacks.miss(&key);
        debug!(key = %key, "Cache miss; running handler");

        let interceptor = ResponseInterceptor::new(key);
        let response = next.run(request).await;
        let (response, pending) = interceptor.observe(response).await;

        if let Some(pending) = pending {
            let cache = self.clone();
            tokio::spawn(async move { cache.persist(backend.as_ref(), pending).await });
        }

        response
    }

    /// Stores a captured response. Failures are reported and otherwise ignored.
    async fn persist(&self, backend: &dyn CacheBackend, pending: PendingWrite) {
        let PendingWrite {
            key,
            entry,
            options,
        } = pending;

        let outcome = AssertUnwindSafe(backend.set(&key, entry, options))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => debug!(key = %key, ttl = options.ttl, "Cached response"),
            Ok(Err(err)) => self.report(CacheFailure::Write(err), &key),
            Err(_) => self.diagnose(&"cache backend panicked during write", &key),
        }
    }

    /// Logs a contained failure and passes it to `on_error`.
    fn report(&self, failure: CacheFailure, key: &str) {
        self.diagnose(&failure, key);
        self.options.callbacks.error(&failure, key);
    }

    fn diagnose(&self, failure: &dyn fmt::Display, key: &str) {
        if !self.environment.is_production() {
            warn!(
                key = %key,
                backend = ?self.backend.as_deref().map(|backend| backend.backend_type()),
                "{}",
                failure
            );
        }
    }
}

impl fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseCache")
            .field(
                "backend",
                &self.backend.as_deref().map(|backend| backend.backend_type()),
            )
            .field("options", &self.options)
            .field("environment", &self.environment)
            .finish()
    }
}

// == Replay ==
/// Rebuilds a response from a stored entry.
///
/// JSON bodies go out as `application/json`, anything else as HTML text. Cache-Control
/// is set only when a remaining TTL is known.
fn replay(entry: &CachedResponse, ttl: Option<u64>) -> Result<Response, CacheFailure> {
    let status = StatusCode::from_u16(entry.status_code).map_err(|_| {
        CacheFailure::InvalidEntry(format!("invalid status code {}", entry.status_code))
    })?;

    let mut response = match serde_json::from_str::<serde_json::Value>(&entry.body) {
        Ok(value) => Json(value).into_response(),
        Err(_) => Html(entry.body.clone()).into_response(),
    };
    *response.status_mut() = status;

    if let Some(ttl) = ttl {
        let value = HeaderValue::from_str(&cache_control_value(entry.accessibility, ttl))
            .map_err(|err| CacheFailure::InvalidEntry(err.to_string()))?;
        response.headers_mut().insert(header::CACHE_CONTROL, value);
    }

    Ok(response)
}

// == Axum Entry Point ==
/// Middleware function for `axum::middleware::from_fn_with_state`.
///
/// ```ignore
/// let cache = ResponseCache::new(Arc::new(MemoryBackend::new(1000, 300)), CacheOptions::new());
/// let app = Router::new()
///     .route("/", get(handler))
///     .layer(axum::middleware::from_fn_with_state(cache, intercept));
/// ```
pub async fn intercept(State(cache): State<ResponseCache>, request: Request, next: Next) -> Response {
    cache.handle(request, next).await
}
