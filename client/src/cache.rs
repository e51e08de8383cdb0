//! Time-bounded response cache.
//!
//! Keyed by the full request path including the serialized query string,
//! so differently filtered requests to the same resource never collide.
//! Expired entries are evicted lazily on lookup; there is no size bound.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde_json::Value;
use tracing::trace;

/// A cached payload plus the moment it was stored.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: Value,
    pub timestamp: Instant,
}

#[derive(Debug)]
pub(crate) struct ResponseCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ResponseCache {
    pub(crate) fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Return the cached payload for `key` if present and fresh.
    /// A stale entry is removed and reported as a miss.
    pub(crate) fn fetch(&self, key: &str) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) if entry.timestamp.elapsed() < self.ttl => {
                trace!(key, "response cache hit");
                return Some(entry.data.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            trace!(key, "evicting expired cache entry");
            self.entries.remove(key);
        }
        None
    }

    pub(crate) fn store(&self, key: &str, data: Value) {
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                data,
                timestamp: Instant::now(),
            },
        );
    }

    pub(crate) fn get(&self, key: &str) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub(crate) fn remove(&self, key: &str) {
        self.entries.remove(key);
    }

    pub(crate) fn clear(&self) {
        self.entries.clear();
    }
}
