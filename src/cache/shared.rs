//! Shared Cache Module
//!
//! Thread-safe handle around a [`SmartCache`], for instances shared between
//! threads or async tasks.
//!
//! Every operation takes one lock for its whole duration and releases it
//! before returning. No operation blocks on I/O, so the lock is never held
//! across an `.await`.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::clock::{Clock, MonotonicClock};
use crate::cache::{CacheMetrics, CacheStats, SmartCache};
use crate::config::CacheConfig;
use crate::error::Result;

// == Shared Cache ==
/// Cloneable, lock-protected cache handle. Clones share the same entries.
#[derive(Debug)]
pub struct SharedCache<V, C = MonotonicClock> {
    inner: Arc<Mutex<SmartCache<V, C>>>,
}

impl<V, C> Clone for SharedCache<V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> SharedCache<V, MonotonicClock> {
    pub fn new(config: CacheConfig) -> Result<Self> {
        SmartCache::new(config).map(Self::from_cache)
    }
}

impl<V, C: Clock> SharedCache<V, C> {
    pub fn with_clock(config: CacheConfig, clock: C) -> Result<Self> {
        SmartCache::with_clock(config, clock).map(Self::from_cache)
    }

    /// Wraps an existing cache.
    pub fn from_cache(cache: SmartCache<V, C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: V, ttl: Option<Duration>) -> Result<()> {
        self.inner.lock().set(key, value, ttl)
    }

    /// Returns a copy of the live value, marking it as recently used.
    pub fn get(&self, key: &str) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn has(&self, key: &str) -> bool {
        self.inner.lock().has(key)
    }

    pub fn remove(&self, key: &str) -> bool {
        self.inner.lock().remove(key)
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn keys(&self) -> Vec<String> {
        self.inner.lock().keys()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.inner.lock().metrics()
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.inner.lock().ttl_remaining(key)
    }

    /// Returns the cached value, computing and storing it on a miss.
    ///
    /// `fetch` runs without the lock held. Two callers missing at the same
    /// time may both fetch; the later `set` wins.
    pub fn get_or_insert_with<F>(&self, key: &str, fetch: F) -> Result<V>
    where
        V: Clone,
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = fetch();
        self.set(key, value.clone(), None)?;
        Ok(value)
    }

    /// Fallible variant of [`get_or_insert_with`](Self::get_or_insert_with).
    pub fn try_get_or_insert_with<F, E>(&self, key: &str, fetch: F) -> std::result::Result<V, E>
    where
        V: Clone,
        F: FnOnce() -> std::result::Result<V, E>,
        E: From<crate::error::CacheError>,
    {
        if let Some(value) = self.get(key) {
            return Ok(value);
        }
        let value = fetch()?;
        self.set(key, value.clone(), None)?;
        Ok(value)
    }

    /// Runs `f` with exclusive access, for compound operations that must be
    /// atomic as a whole.
    pub fn with_lock<R>(&self, f: impl FnOnce(&mut SmartCache<V, C>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
