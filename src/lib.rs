//! Smart Cache - an in-process cache with TTL expiration and pluggable eviction
//!
//! Memoizes expensive reads (database lookups, permission checks) behind a
//! bounded, generic key-value store. Entries expire lazily after their TTL and
//! the least recently used entry is evicted when the bound would be exceeded.

pub mod cache;
pub mod config;
pub mod error;

pub use cache::{
    create_cache_key, CacheMetrics, CacheStats, Clock, EvictionStrategy, ManualClock,
    MonotonicClock, SharedCache, SmartCache, KEY_DELIMITER,
};
pub use config::CacheConfig;
pub use error::{CacheError, Result};
