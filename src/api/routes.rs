//! API Routes
//!
//! Configures the demo router: cached content routes plus uncached operational ones.

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{echo_handler, health_handler, hello_handler, stats_handler, AppState};
use crate::middleware::intercept;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /` - Greeting, cached
/// - `GET /echo?message=..&to_upper=..` - Echo, cached
/// - `GET /stats` - Store statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Response cache on the content routes only
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let cached = Router::new()
        .route("/", get(hello_handler))
        .route("/echo", get(echo_handler))
        .route_layer(from_fn_with_state(state.cache.clone(), intercept));

    Router::new()
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .merge(cached)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
