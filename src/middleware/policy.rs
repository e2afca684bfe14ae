//! Caching policy derived from a response's Cache-Control header
//!
//! Only the `[public|private, ]max-age=N` subset is understood; every other directive is
//! ignored.

use axum::http::{header, HeaderMap};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Accessibility;

/// `[<token>, ]max-age=<digits>` anywhere in the header. The accessibility group is greedy,
/// so with several comma-separated directives it captures everything before the last
/// `, max-age=` and then fails the public/private check.
static MAX_AGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"((.*),\s+?)?max-age=(\d+).*").expect("max-age pattern is valid")
});

/// How long a response may be cached and by whom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// Lifetime in seconds
    pub max_age: u64,
    /// `public` / `private`, when the header said so
    pub accessibility: Option<Accessibility>,
}

impl CachePolicy {
    /// Renders the policy back into Cache-Control syntax.
    pub fn to_header_value(&self) -> String {
        cache_control_value(self.accessibility, self.max_age)
    }
}

/// Derives a caching policy from a Cache-Control header value.
///
/// Returns `None` ("do not cache") when the header is absent or carries no
/// `max-age=<digits>`. An accessibility token other than `public`/`private` is dropped
/// and the max-age kept.
pub fn derive_policy(cache_control: Option<&str>) -> Option<CachePolicy> {
    let captures = MAX_AGE_PATTERN.captures(cache_control?)?;
    let max_age = captures.get(3)?.as_str().parse().ok()?;

    let accessibility = captures
        .get(2)
        .and_then(|token| token.as_str().trim().to_lowercase().parse().ok());

    Some(CachePolicy {
        max_age,
        accessibility,
    })
}

/// Derives a caching policy from the Cache-Control entry of a header map.
pub fn policy_from_headers(headers: &HeaderMap) -> Option<CachePolicy> {
    derive_policy(
        headers
            .get(header::CACHE_CONTROL)
            .and_then(|value| value.to_str().ok()),
    )
}

/// Formats `{accessibility}, max-age={seconds}` or `max-age={seconds}`.
pub fn cache_control_value(accessibility: Option<Accessibility>, max_age: u64) -> String {
    match accessibility {
        Some(accessibility) => format!("{}, max-age={}", accessibility, max_age),
        None => format!("max-age={}", max_age),
    }
}
