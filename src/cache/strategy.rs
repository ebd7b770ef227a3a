//! Eviction Strategy Module
//!
//! The closed set of eviction strategies and the ranking each one applies.
//! The entry with the lowest rank is the next eviction victim.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cache::entry::CacheEntry;
use crate::cache::rank::Rank;
use crate::error::CacheError;

// == Eviction Strategy ==
/// Which entry to drop when a new key would exceed `max_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionStrategy {
    /// Least recently used: oldest insertion or hit goes first
    #[default]
    Lru,
    /// First in, first out: oldest first insertion goes first
    Fifo,
    /// Least frequently used: fewest hits goes first, LRU among equals
    Lfu,
}

impl EvictionStrategy {
    /// Identifier as used in configuration and stats.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "lru",
            EvictionStrategy::Fifo => "fifo",
            EvictionStrategy::Lfu => "lfu",
        }
    }

    // == Rank ==
    /// Computes the eviction rank of an entry.
    pub(crate) fn rank<V>(&self, entry: &CacheEntry<V>) -> Rank {
        match self {
            EvictionStrategy::Lru => (entry.last_accessed_at, entry.accessed_seq),
            EvictionStrategy::Fifo => (entry.inserted_seq, 0),
            EvictionStrategy::Lfu => (entry.hits, entry.accessed_seq),
        }
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionStrategy {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(EvictionStrategy::Lru),
            "fifo" => Ok(EvictionStrategy::Fifo),
            "lfu" => Ok(EvictionStrategy::Lfu),
            _ => Err(CacheError::UnknownStrategy(s.to_string())),
        }
    }
}
