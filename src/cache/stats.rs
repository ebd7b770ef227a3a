//! Cache Statistics Module
//!
//! Point-in-time stats snapshots and lifetime operation counters.

use serde::Serialize;

use crate::cache::EvictionStrategy;

// == Cache Stats ==
/// Snapshot of a cache's occupancy and configuration.
///
/// Serializes as `{"size", "maxSize", "expired", "strategy"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Stored entries, including expired ones not yet purged
    pub size: usize,
    /// Configured capacity
    pub max_size: usize,
    /// Stored entries whose TTL has elapsed
    pub expired: usize,
    /// Configured eviction strategy
    pub strategy: EvictionStrategy,
}

impl CacheStats {
    /// Entries that would be served by `get`.
    pub fn live(&self) -> usize {
        self.size.saturating_sub(self.expired)
    }
}

// == Cache Metrics ==
/// Tracks cache performance counters over the lifetime of an instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheMetrics {
    /// Number of successful cache retrievals
    pub hits: u64,
    /// Number of failed cache retrievals (key not found or expired)
    pub misses: u64,
    /// Number of live entries dropped to respect `max_size`
    pub evictions: u64,
    /// Number of expired entries removed
    pub expirations: u64,
}

impl CacheMetrics {
    // == Constructor ==
    /// Creates a new CacheMetrics with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_expirations(&mut self, count: usize) {
        self.expirations += count as u64;
    }
}
