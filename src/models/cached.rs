//! Cached response model
//!
//! The value persisted for every cacheable response.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// == Accessibility ==
/// `public` / `private` classification carried in a Cache-Control header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accessibility {
    Public,
    Private,
}

impl Accessibility {
    /// Returns the lower-case directive name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Accessibility::Public => "public",
            Accessibility::Private => "private",
        }
    }
}

impl fmt::Display for Accessibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Accessibility {
    type Err = ();

    /// Accepts exactly `public` or `private`; callers normalize case and whitespace first.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Accessibility::Public),
            "private" => Ok(Accessibility::Private),
            _ => Err(()),
        }
    }
}

// == Cached Response ==
/// A response captured on a cacheable miss and replayed on later hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedResponse {
    /// HTTP status code of the original response
    pub status_code: u16,
    /// Response body exactly as the handler wrote it
    pub body: String,
    /// Accessibility from the handler's Cache-Control header, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<Accessibility>,
}

impl CachedResponse {
    /// Creates a new CachedResponse
    pub fn new(
        status_code: u16,
        body: impl Into<String>,
        accessibility: Option<Accessibility>,
    ) -> Self {
        Self {
            status_code,
            body: body.into(),
            accessibility,
        }
    }
}
