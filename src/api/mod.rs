//! API Module
//!
//! Demo host for the response cache.
//!
//! # Endpoints
//! - `GET /` - Greeting (cached)
//! - `GET /echo` - Echo of the `message` query parameter (cached)
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
