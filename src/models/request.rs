//! Request descriptor
//!
//! The read-only view of an inbound request that cache keys are derived from.

use std::collections::BTreeMap;

use axum::http::{request::Parts, HeaderMap, HeaderName, HeaderValue, Method, Request, Uri};
use url::form_urlencoded;

/// Method, path, headers and query parameters of one request.
///
/// Query parameters map to `None` when they were given without a value (`?flag` or `?flag=`).
/// Such parameters are dropped from cache keys.
#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    /// HTTP method, e.g. `GET`
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// Request headers (case-insensitive names)
    pub headers: HeaderMap,
    /// Query parameters by name
    pub query: BTreeMap<String, Option<String>>,
}

impl RequestDescriptor {
    // == Constructor ==
    /// Creates a descriptor with no headers and no query parameters.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            headers: HeaderMap::new(),
            query: BTreeMap::new(),
        }
    }

    /// Adds a query parameter with a value.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), Some(value.into()));
        self
    }

    /// Adds a query parameter that is present but has no value.
    pub fn with_null_query(mut self, name: impl Into<String>) -> Self {
        self.query.insert(name.into(), None);
        self
    }

    /// Adds a request header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    // == From Request Parts ==
    /// Builds a descriptor from the head of an HTTP request.
    pub fn from_parts(parts: &Parts) -> Self {
        Self::from_head(&parts.method, &parts.uri, &parts.headers)
    }

    fn from_head(method: &Method, uri: &Uri, headers: &HeaderMap) -> Self {
        Self {
            method: method.as_str().to_string(),
            path: uri.path().to_string(),
            headers: headers.clone(),
            query: uri.query().map(parse_query).unwrap_or_default(),
        }
    }

    /// Returns the value of a header as text, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

impl<B> From<&Request<B>> for RequestDescriptor {
    fn from(request: &Request<B>) -> Self {
        Self::from_head(request.method(), request.uri(), request.headers())
    }
}

// == Query Parsing ==
/// Parses a raw query string into parameters.
///
/// Names and values are percent-decoded. Empty values become `None` and a repeated
/// name keeps its last value.
pub fn parse_query(query: &str) -> BTreeMap<String, Option<String>> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| {
            let value = if value.is_empty() {
                None
            } else {
                Some(value.into_owned())
            };
            (name.into_owned(), value)
        })
        .collect()
}
