//! Response DTOs for the demo host
//!
//! Bodies of the uncached operational endpoints.

use serde::Serialize;

use crate::cache::CacheStats;

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Number of store lookups that found a live entry
    pub hits: u64,
    /// Number of store lookups that found nothing or an expired entry
    pub misses: u64,
    /// Number of evictions
    pub evictions: u64,
    /// Current number of entries in the store
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Whether a cache backend is wired into the middleware
    pub cache_enabled: bool,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(cache_enabled: bool) -> Self {
        Self {
            status: "healthy".to_string(),
            cache_enabled,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
