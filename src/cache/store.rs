//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a rank index for eviction
//! and lazy TTL expiration.
//!
//! Expiration is only checked when a key is read (`get`/`has`), when it is
//! chosen for eviction, or when the owner calls `purge_expired`. No timers or
//! background tasks are involved.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, trace};

use crate::cache::clock::{duration_to_ms, Clock, MonotonicClock};
use crate::cache::entry::CacheEntry;
use crate::cache::rank::RankIndex;
use crate::cache::{CacheMetrics, CacheStats, EvictionStrategy};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};

// == Smart Cache ==
/// Bounded in-memory cache with TTL expiration and pluggable eviction.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use smart_cache::{CacheConfig, SmartCache};
///
/// let mut cache = SmartCache::new(CacheConfig::new(Duration::from_secs(60), 100)).unwrap();
/// cache.set("users:1", "Ada".to_string(), None).unwrap();
/// assert_eq!(cache.get("users:1").map(String::as_str), Some("Ada"));
/// assert_eq!(cache.get("users:2"), None);
/// ```
#[derive(Debug)]
pub struct SmartCache<V, C = MonotonicClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Eviction order
    index: RankIndex,
    /// Lifetime counters
    metrics: CacheMetrics,
    /// TTL for entries stored without an override
    default_ttl: Duration,
    /// Maximum number of entries allowed
    max_size: usize,
    strategy: EvictionStrategy,
    clock: C,
    /// Next insertion/hit sequence number
    seq: u64,
}

impl<V> SmartCache<V, MonotonicClock> {
    // == Constructor ==
    /// Creates a cache driven by the system's monotonic clock.
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl<V, C: Clock> SmartCache<V, C> {
    /// Creates a cache driven by a custom clock.
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        config.validate()?;
        debug!(
            ttl_ms = duration_to_ms(config.ttl),
            max_size = config.max_size,
            strategy = %config.strategy,
            "Cache created"
        );

        Ok(Self {
            entries: HashMap::with_capacity(config.max_size.min(1024)),
            index: RankIndex::new(),
            metrics: CacheMetrics::new(),
            default_ttl: config.ttl,
            max_size: config.max_size,
            strategy: config.strategy,
            clock,
            seq: 0,
        })
    }

    // == Set ==
    /// Stores a value under `key`.
    ///
    /// If the key already exists, the value is overwritten and its TTL and
    /// recency are reset; this does not count as a new insertion. If the key
    /// is new and the cache is full, exactly one entry (the lowest-ranked for
    /// the configured strategy) is evicted first.
    ///
    /// # Arguments
    /// * `key` - Non-empty key
    /// * `value` - The value to store
    /// * `ttl` - TTL for this entry only (uses the configured default if None)
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        self.store(key.into(), value, ttl).map(|_| ())
    }

    // == Get ==
    /// Retrieves a live value and marks it as recently used.
    ///
    /// Returns None for absent and expired keys alike; an expired entry is
    /// removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        if self.hit(key) {
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            None
        }
    }

    // == Has ==
    /// Checks whether a live value is stored, without affecting eviction order.
    pub fn has(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => return false,
        };

        if expired {
            self.expire(key);
        }
        !expired
    }

    // == Remove ==
    /// Removes an entry, live or expired.
    ///
    /// Returns whether anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.discard(key).is_some();
        if removed {
            debug!(key, "Removed entry");
        }
        removed
    }

    // == Clear ==
    /// Removes every entry. Lifetime metrics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    // == Length ==
    /// Returns the number of stored entries, including expired entries that
    /// have not been purged yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Stats ==
    /// Returns an occupancy snapshot.
    ///
    /// Counting expired entries scans the whole store.
    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_ms();
        CacheStats {
            size: self.entries.len(),
            max_size: self.max_size,
            expired: self
                .entries
                .values()
                .filter(|entry| entry.is_expired_at(now))
                .count(),
            strategy: self.strategy,
        }
    }

    // == Keys ==
    /// Returns every stored key, live or expired, next eviction victim first.
    pub fn keys(&self) -> Vec<String> {
        self.index.keys().cloned().collect()
    }

    // == Metrics ==
    /// Returns hit, miss, eviction and expiration counters.
    pub fn metrics(&self) -> CacheMetrics {
        self.metrics
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        for key in expired_keys {
            self.discard(&key);
        }

        self.metrics.record_expirations(count);
        if count > 0 {
            debug!(removed = count, "Purged expired entries");
        }
        count
    }

    // == Time To Live ==
    /// Returns the remaining TTL of a live entry.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| Duration::from_millis(entry.ttl_remaining_ms(now)))
    }

    // == Get Or Insert ==
    /// Returns the cached value, computing and storing it on a miss.
    ///
    /// The computed value is stored with the default TTL.
    pub fn get_or_insert_with<F>(&mut self, key: &str, fetch: F) -> Result<&V>
    where
        F: FnOnce() -> V,
    {
        if self.hit(key) {
            return Ok(&self.entries[key].value);
        }
        let entry = self.store(key.to_string(), fetch(), None)?;
        Ok(&entry.value)
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with) for a fallible fetch.
    ///
    /// A failed fetch stores nothing.
    pub fn try_get_or_insert_with<F, E>(&mut self, key: &str, fetch: F) -> std::result::Result<&V, E>
    where
        F: FnOnce() -> std::result::Result<V, E>,
        E: From<CacheError>,
    {
        if self.hit(key) {
            return Ok(&self.entries[key].value);
        }
        let value = fetch()?;
        let entry = self.store(key.to_string(), value, None)?;
        Ok(&entry.value)
    }

    // == Configuration ==
    /// Returns the configuration this cache was built with.
    pub fn config(&self) -> CacheConfig {
        CacheConfig {
            ttl: self.default_ttl,
            max_size: self.max_size,
            strategy: self.strategy,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn strategy(&self) -> EvictionStrategy {
        self.strategy
    }

    // == Internals ==

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Inserts or overwrites, evicting first if a new key would overflow.
    fn store(&mut self, key: String, value: V, ttl: Option<Duration>) -> Result<&mut CacheEntry<V>> {
        if key.is_empty() {
            return Err(CacheError::InvalidKey("key must not be empty".to_string()));
        }
        let ttl = ttl.unwrap_or(self.default_ttl);
        let ttl_ms = duration_to_ms(ttl);
        if ttl_ms == 0 {
            return Err(CacheError::InvalidTtl(format!(
                "ttl must be at least 1ms, got {:?}",
                ttl
            )));
        }

        let now = self.clock.now_ms();
        let seq = self.next_seq();
        let strategy = self.strategy;

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_size {
            self.evict_one(now);
        }

        let index = &mut self.index;
        let entry = match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                let key = occupied.key().clone();
                let entry = occupied.into_mut();
                index.remove(&entry.rank);
                entry.replace(value, now, ttl_ms, seq);
                entry.rank = strategy.rank(entry);
                index.insert(entry.rank, key);
                entry
            }
            Entry::Vacant(vacant) => {
                let mut entry = CacheEntry::new(value, now, ttl_ms, seq);
                entry.rank = strategy.rank(&entry);
                index.insert(entry.rank, vacant.key().clone());
                vacant.insert(entry)
            }
        };

        Ok(entry)
    }

    /// Looks up a live entry and records the access. Returns whether it hit.
    fn hit(&mut self, key: &str) -> bool {
        let now = self.clock.now_ms();
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired_at(now),
            None => {
                self.metrics.record_miss();
                return false;
            }
        };

        if expired {
            self.expire(key);
            self.metrics.record_miss();
            return false;
        }

        let seq = self.next_seq();
        if let Some(entry) = self.entries.get_mut(key) {
            let indexed = self
                .index
                .remove(&entry.rank)
                .unwrap_or_else(|| key.to_string());
            entry.touch(now, seq);
            entry.rank = self.strategy.rank(entry);
            self.index.insert(entry.rank, indexed);
        }
        self.metrics.record_hit();
        true
    }

    /// Drops the lowest-ranked entry.
    fn evict_one(&mut self, now: u64) {
        let Some(key) = self.index.pop_lowest() else {
            return;
        };

        if let Some(entry) = self.entries.remove(&key) {
            if entry.is_expired_at(now) {
                self.metrics.record_expirations(1);
                trace!(key = %key, "Dropped expired entry to make room");
            } else {
                self.metrics.record_eviction();
                debug!(key = %key, strategy = %self.strategy, "Evicted entry to stay within max_size");
            }
        }
        debug_assert_eq!(self.index.len(), self.entries.len());
    }

    /// Removes an entry found expired on access.
    fn expire(&mut self, key: &str) {
        if self.discard(key).is_some() {
            self.metrics.record_expirations(1);
            trace!(key, "Expired entry removed on access");
        }
    }

    fn discard(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.index.remove(&entry.rank);
        Some(entry)
    }
}
