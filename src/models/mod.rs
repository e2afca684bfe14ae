//! Data model for the response cache
//!
//! Request descriptors that keys are derived from, the cached entry format, and the
//! DTOs served by the demo host.

pub mod cached;
pub mod request;
pub mod responses;

// Re-export commonly used types
pub use cached::{Accessibility, CachedResponse};
pub use request::RequestDescriptor;
pub use responses::{HealthResponse, StatsResponse};
