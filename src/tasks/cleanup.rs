//! Expiry Sweep Task
//!
//! Background task that periodically drops expired responses from the in-memory backend.
//! Reads already ignore expired entries; the sweep only reclaims their memory.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::MemoryBackend;

/// Spawns a background task that sweeps expired entries every `cleanup_interval_secs`.
///
/// # Returns
/// A JoinHandle for the spawned task; abort it during graceful shutdown.
///
/// # Example
/// ```ignore
/// let backend = MemoryBackend::new(1000, 300);
/// let cleanup_handle = spawn_cleanup_task(backend.clone(), 1);
/// // Later, during shutdown:
/// cleanup_handle.abort();
/// ```
pub fn spawn_cleanup_task(backend: MemoryBackend, cleanup_interval_secs: u64) -> JoinHandle<()> {
    // A zero interval would spin; sweep at least once per second
    let interval = Duration::from_secs(cleanup_interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting cache expiry sweep with interval of {} seconds",
            interval.as_secs()
        );

        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let removed = backend.cleanup_expired().await;
            if removed > 0 {
                info!("Cache sweep: removed {} expired responses", removed);
            } else {
                debug!("Cache sweep: no expired responses found");
            }
        }
    })
}
