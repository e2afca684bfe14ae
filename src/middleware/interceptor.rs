//! Write interception
//!
//! Wraps the response a handler produced on a cache miss. The caller gets the same
//! status, headers and bytes back; when the response is cacheable the interceptor also
//! yields the entry to persist.

use axum::body::{Body, Bytes};
use axum::http::header;
use axum::response::Response;
use futures::{stream, StreamExt};
use tracing::{debug, warn};

use crate::cache::{SetOptions, MAX_VALUE_SIZE};
use crate::middleware::policy::policy_from_headers;
use crate::models::CachedResponse;

/// An entry the interceptor decided should be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingWrite {
    pub key: String,
    pub entry: CachedResponse,
    pub options: SetOptions,
}

/// Observes the single response a downstream handler writes for one key.
///
/// Create it before running the handler and hand it the handler's response; it is
/// consumed by that one observation.
#[derive(Debug)]
pub struct ResponseInterceptor {
    key: String,
    max_body_size: usize,
}

impl ResponseInterceptor {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            max_body_size: MAX_VALUE_SIZE,
        }
    }

    /// Caps how many body bytes are buffered for capture.
    pub fn with_max_body_size(mut self, max_body_size: usize) -> Self {
        self.max_body_size = max_body_size;
        self
    }

    /// Passes `response` through, capturing it when it is cacheable.
    ///
    /// Cacheable means a 2xx status, a Cache-Control header with a max-age and a body no
    /// larger than the buffer cap. Only those bodies are buffered; everything else streams
    /// through untouched. A body over the cap is re-streamed from the bytes read so far
    /// and is not cached. A body that is not UTF-8 is delivered but not cached.
    pub async fn observe(self, response: Response) -> (Response, Option<PendingWrite>) {
        let (mut parts, body) = response.into_parts();

        if !parts.status.is_success() {
            return (Response::from_parts(parts, body), None);
        }

        let Some(policy) = policy_from_headers(&parts.headers) else {
            debug!(key = %self.key, "Response carries no max-age; not caching");
            return (Response::from_parts(parts, body), None);
        };

        let bytes = match buffer_body(body, self.max_body_size).await {
            Buffered::Complete(bytes) => bytes,
            Buffered::Oversized(body) => {
                debug!(
                    key = %self.key,
                    limit = self.max_body_size,
                    "Response body exceeds buffer cap; not caching"
                );
                return (Response::from_parts(parts, body), None);
            }
            Buffered::Failed(err) => {
                warn!(key = %self.key, error = %err, "Failed to buffer response body");
                parts.headers.remove(header::CONTENT_LENGTH);
                return (Response::from_parts(parts, Body::empty()), None);
            }
        };

        let pending = match std::str::from_utf8(&bytes) {
            Ok(text) => Some(PendingWrite {
                entry: CachedResponse::new(parts.status.as_u16(), text, policy.accessibility),
                options: SetOptions::with_ttl(policy.max_age),
                key: self.key,
            }),
            Err(_) => {
                debug!(key = %self.key, "Response body is not UTF-8; not caching");
                None
            }
        };

        (Response::from_parts(parts, Body::from(bytes)), pending)
    }
}

// == Body Buffering ==
enum Buffered {
    Complete(Bytes),
    /// The chunks read so far chained in front of the unread rest
    Oversized(Body),
    Failed(axum::Error),
}

async fn buffer_body(body: Body, limit: usize) -> Buffered {
    let mut rest = body.into_data_stream();
    let mut chunks: Vec<Bytes> = Vec::new();
    let mut size = 0usize;

    while let Some(chunk) = rest.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(err) => return Buffered::Failed(err),
        };
        size = size.saturating_add(chunk.len());
        chunks.push(chunk);

        if size > limit {
            let read = stream::iter(chunks.into_iter().map(Ok::<_, axum::Error>));
            return Buffered::Oversized(Body::from_stream(read.chain(rest)));
        }
    }

    let mut buffer = Vec::with_capacity(size);
    for chunk in &chunks {
        buffer.extend_from_slice(chunk);
    }
    Buffered::Complete(Bytes::from(buffer))
}
