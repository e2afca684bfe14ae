//! Cache Store Module
//!
//! Synchronous storage engine behind [`MemoryBackend`](super::MemoryBackend): a HashMap of
//! serialized payloads with LRU eviction and TTL expiration.

use std::collections::HashMap;

use crate::cache::{CacheStats, LruTracker, StoreEntry, MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Payload storage with LRU eviction and TTL support.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-payload storage
    entries: HashMap<String, StoreEntry>,
    /// LRU access tracker
    lru: LruTracker,
    /// Store counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL in seconds for entries written without one
    default_ttl: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with specified capacity and default TTL.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the store can hold
    /// * `default_ttl` - TTL in seconds for entries written without an explicit TTL
    pub fn new(max_entries: usize, default_ttl: u64) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_entries,
            default_ttl,
        }
    }

    // == Set ==
    /// Stores a payload under `key`, replacing any previous entry and its TTL.
    ///
    /// When the store is full the least recently used entry is evicted first.
    pub fn set(&mut self, key: String, payload: String, ttl: Option<u64>) -> Result<()> {
        if key.len() > MAX_KEY_LENGTH {
            return Err(CacheError::InvalidEntry(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if payload.len() > MAX_VALUE_SIZE {
            return Err(CacheError::InvalidEntry(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            // Reclaim expired entries before evicting live ones
            if self.cleanup_expired() == 0 {
                match self.lru.evict_oldest() {
                    Some(victim) => {
                        self.entries.remove(&victim);
                        self.stats.record_eviction();
                    }
                    None => {
                        return Err(CacheError::CacheFull(
                            "Cache is full and eviction failed".to_string(),
                        ))
                    }
                }
            }
        }

        let entry = StoreEntry::expiring(payload, ttl.unwrap_or(self.default_ttl));
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);

        self.stats.record_write();
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Returns the payload stored under `key`, if present and not expired.
    ///
    /// Expired entries are removed on access and count as misses.
    pub fn get(&mut self, key: &str) -> Option<String> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let payload = entry.payload.clone();
                self.stats.record_hit();
                self.lru.touch(key);
                return Some(payload);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
        }
        self.stats.record_miss();
        None
    }

    // == TTL ==
    /// Returns the remaining TTL of a live entry in whole seconds.
    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(StoreEntry::remaining_secs)
    }

    // == Cleanup Expired ==
    /// Removes all expired entries and returns how many were dropped.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    /// Returns a snapshot of the store counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the current number of entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove_entry(&mut self, key: &str) {
        self.entries.remove(key);
        self.lru.remove(key);
        self.stats.set_total_entries(self.entries.len());
    }
}
