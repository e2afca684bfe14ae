//! Cache key derivation
//!
//! Keys have the shape `{prefix}{METHOD}{:header:value...}:{path}{?sorted=query}` and are a
//! pure function of the request descriptor and the options.

use std::collections::BTreeMap;

use crate::middleware::CacheOptions;
use crate::models::RequestDescriptor;

/// Derives the cache key for a request.
///
/// Identical inputs always produce the identical key; the order in which query
/// parameters arrived does not matter.
pub fn derive_key(request: &RequestDescriptor, options: &CacheOptions) -> String {
    format!(
        "{}{}{}:{}{}",
        normalize_prefix(options.prefix.as_deref()),
        request.method,
        header_infix(request, options.headers.as_deref()),
        request.path,
        normalized_query(&request.query, &options.defaults),
    )
}

/// Trims the prefix and makes sure a non-empty prefix ends with exactly one added `:`.
fn normalize_prefix(prefix: Option<&str>) -> String {
    let prefix = prefix.map(str::trim).unwrap_or_default();
    if prefix.is_empty() {
        String::new()
    } else if prefix.ends_with(':') {
        prefix.to_string()
    } else {
        format!("{}:", prefix)
    }
}

/// Renders `:name:value` pairs for the headers that vary the key.
///
/// Names are lower-cased and sorted; a header missing from the request contributes an
/// empty value. No configured headers means no infix.
fn header_infix(request: &RequestDescriptor, headers: Option<&[String]>) -> String {
    let Some(headers) = headers.filter(|headers| !headers.is_empty()) else {
        return String::new();
    };

    let mut names: Vec<String> = headers.iter().map(|name| name.to_lowercase()).collect();
    names.sort();

    let pairs: Vec<String> = names
        .iter()
        .map(|name| format!("{}:{}", name, request.header(name).unwrap_or_default()))
        .collect();

    format!(":{}", pairs.join(":"))
}

/// Merges request parameters over the defaults and renders them sorted by name.
///
/// A default only fills a parameter the request does not mention at all. A parameter
/// the request sends without a value is dropped, default or not.
fn normalized_query(
    query: &BTreeMap<String, Option<String>>,
    defaults: &BTreeMap<String, String>,
) -> String {
    let mut merged: BTreeMap<&str, &str> = defaults
        .iter()
        .filter(|(name, _)| !query.contains_key(name.as_str()))
        .map(|(name, value)| (name.as_str(), value.as_str()))
        .collect();

    merged.extend(
        query
            .iter()
            .filter_map(|(name, value)| value.as_deref().map(|value| (name.as_str(), value))),
    );

    if merged.is_empty() {
        return String::new();
    }

    let rendered: Vec<String> = merged
        .iter()
        .map(|(name, value)| format!("{}={}", name, value))
        .collect();

    format!("?{}", rendered.join("&"))
}
