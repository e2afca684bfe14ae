//! API Handlers
//!
//! Handlers of the demo host. `/` and `/echo` sit behind the response cache; `/stats`
//! and `/health` do not.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::cache::MemoryBackend;
use crate::config::Config;
use crate::middleware::{CacheCallbacks, CacheOptions, ResponseCache};
use crate::models::{HealthResponse, StatsResponse};

/// Cache-Control sent by the cached demo routes
pub const DEMO_CACHE_CONTROL: &str = "private, max-age=300";

/// Application state shared across all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// In-memory store, kept for statistics
    pub backend: MemoryBackend,
    /// The caching layer mounted on the cached routes
    pub cache: ResponseCache,
}

impl AppState {
    /// Creates a new AppState caching into `backend` with the given options.
    pub fn new(backend: MemoryBackend, options: CacheOptions) -> Self {
        let cache = ResponseCache::new(Arc::new(backend.clone()), options);
        Self { backend, cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// `to_upper` defaults to `false` so `/echo?message=hi` and
    /// `/echo?message=hi&to_upper=false` share one cache entry. Callbacks log every
    /// cache decision.
    pub fn from_config(config: &Config) -> Self {
        let backend = MemoryBackend::new(config.max_entries, config.default_ttl);
        let options = config
            .cache_options()
            .default_param("to_upper", false)
            .callbacks(logging_callbacks());

        let cache = ResponseCache::new(Arc::new(backend.clone()), options)
            .with_environment(config.environment);
        Self { backend, cache }
    }
}

/// Callbacks that report cache activity through tracing.
pub fn logging_callbacks() -> CacheCallbacks {
    CacheCallbacks::new()
        .on_attempt(|key| tracing::info!("Cache attempt! key={}", key))
        .on_hit(|key, value| tracing::info!("Cache hit! key={}, value={}", key, value.body))
        .on_miss(|key| tracing::info!("Cache miss! key={}", key))
        .on_error(|err, key| tracing::info!("Cache error! err={}, key={}", err, key))
}

/// Query parameters of GET /echo
#[derive(Debug, Clone, Deserialize)]
pub struct EchoParams {
    pub message: Option<String>,
    pub to_upper: Option<String>,
}

/// Handler for GET /
pub async fn hello_handler() -> impl IntoResponse {
    ([(header::CACHE_CONTROL, DEMO_CACHE_CONTROL)], "Hello World!")
}

/// Handler for GET /echo
///
/// Echoes `message`, upper-cased when `to_upper=true`; 400 without a message.
pub async fn echo_handler(Query(params): Query<EchoParams>) -> axum::response::Response {
    let Some(message) = params.message.filter(|message| !message.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "No message specified.").into_response();
    };

    let message = if params.to_upper.as_deref() == Some("true") {
        message.to_uppercase()
    } else {
        message
    };

    ([(header::CACHE_CONTROL, DEMO_CACHE_CONTROL)], message).into_response()
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.backend.stats().await))
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(state.cache.is_enabled()))
}
