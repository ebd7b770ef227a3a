//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and pluggable eviction.

mod clock;
mod entry;
mod key;
mod rank;
mod shared;
mod stats;
mod store;
mod strategy;


// Re-export public types
pub(crate) use clock::duration_to_ms;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use key::{create_cache_key, KEY_DELIMITER};
pub use shared::SharedCache;
pub use stats::{CacheMetrics, CacheStats};
pub use store::SmartCache;
pub use strategy::EvictionStrategy;
