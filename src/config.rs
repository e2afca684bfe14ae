//! Configuration Module
//!
//! Loads host configuration from environment variables.

use std::env;

use crate::middleware::CacheOptions;

/// Deployment environment. Outside production, contained cache failures are logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// `production` (any case) is production; everything else is development.
    pub fn from_name(name: &str) -> Self {
        if name.trim().eq_ignore_ascii_case("production") {
            Environment::Production
        } else {
            Environment::Development
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// Host configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of cached responses held in memory
    pub max_entries: usize,
    /// TTL in seconds for store writes that carry none
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Background expiry sweep interval in seconds
    pub cleanup_interval: u64,
    /// Namespace prepended to every cache key
    pub cache_prefix: Option<String>,
    /// Request headers that vary the cache key
    pub vary_headers: Vec<String>,
    /// Deployment environment
    pub environment: Environment,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Maximum cached responses (default: 1000)
    /// - `DEFAULT_TTL` - Default TTL in seconds (default: 300)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CLEANUP_INTERVAL` - Expiry sweep frequency in seconds (default: 1)
    /// - `CACHE_PREFIX` - Cache key namespace (default: none)
    /// - `CACHE_VARY_HEADERS` - Comma-separated header names (default: none)
    /// - `APP_ENV` - `production` disables cache diagnostics (default: development)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            cache_prefix: env::var("CACHE_PREFIX")
                .ok()
                .filter(|prefix| !prefix.trim().is_empty()),
            vary_headers: env::var("CACHE_VARY_HEADERS")
                .map(|value| split_list(&value))
                .unwrap_or_default(),
            environment: env::var("APP_ENV")
                .map(|name| Environment::from_name(&name))
                .unwrap_or_default(),
        }
    }

    /// Builds middleware options from the key-shaping settings.
    pub fn cache_options(&self) -> CacheOptions {
        let mut options = CacheOptions::new();
        if let Some(prefix) = &self.cache_prefix {
            options = options.prefix(prefix.clone());
        }
        if !self.vary_headers.is_empty() {
            options = options.vary_headers(self.vary_headers.clone());
        }
        options
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: 1000,
            default_ttl: 300,
            server_port: 3000,
            cleanup_interval: 1,
            cache_prefix: None,
            vary_headers: Vec::new(),
            environment: Environment::Development,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|value| value.trim().parse().ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
