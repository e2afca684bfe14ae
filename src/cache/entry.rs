//! Stored payloads and their deadlines
//!
//! Every payload in the store expires; a write without a TTL gets the store default.
//! Deadlines are wall-clock Unix milliseconds.

use std::time::{SystemTime, UNIX_EPOCH};

/// A serialized response plus the instant it stops being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreEntry {
    pub payload: String,
    /// Unix milliseconds at which the entry becomes unreadable
    pub deadline_ms: u64,
}

impl StoreEntry {
    /// Stores `payload` for `ttl_secs` seconds from now. Huge TTLs clamp to `u64::MAX`.
    pub fn expiring(payload: String, ttl_secs: u64) -> Self {
        let deadline_ms = now_ms().saturating_add(ttl_secs.saturating_mul(1000));
        Self {
            payload,
            deadline_ms,
        }
    }

    /// True from the deadline onwards; a zero TTL is never readable.
    pub fn is_expired(&self) -> bool {
        now_ms() >= self.deadline_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.deadline_ms.saturating_sub(now_ms())
    }

    /// Whole seconds left, rounded up so a live entry never reads as 0.
    pub fn remaining_secs(&self) -> u64 {
        self.remaining_ms().div_ceil(1000)
    }
}

/// Wall clock in Unix milliseconds. A clock set before 1970 reads as 0.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
