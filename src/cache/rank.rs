//! Rank Index Module
//!
//! Ordered eviction index: keys sorted by the rank their strategy assigns.

use std::collections::BTreeMap;

/// Eviction rank. Lower ranks are evicted first.
pub(crate) type Rank = (u64, u64);

// == Rank Index ==
/// Tracks eviction order for every stored key.
///
/// Ranks are unique per cache (each includes a sequence number), so the map
/// never holds two keys under one rank.
/// - First = next eviction victim
/// - Last = most protected
#[derive(Debug, Default)]
pub(crate) struct RankIndex {
    order: BTreeMap<Rank, String>,
}

impl RankIndex {
    // == Constructor ==
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            order: BTreeMap::new(),
        }
    }

    // == Insert ==
    /// Places a key at the given rank.
    pub fn insert(&mut self, rank: Rank, key: String) {
        self.order.insert(rank, key);
    }

    // == Remove ==
    /// Removes the key stored at `rank`, returning it.
    pub fn remove(&mut self, rank: &Rank) -> Option<String> {
        self.order.remove(rank)
    }

    // == Pop Lowest ==
    /// Returns and removes the lowest-ranked key.
    ///
    /// Returns None if the index is empty.
    pub fn pop_lowest(&mut self) -> Option<String> {
        self.order.pop_first().map(|(_, key)| key)
    }

    // == Keys ==
    /// Iterates keys from next victim to most protected.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.order.values()
    }

    // == Length ==
    /// Returns the number of indexed keys.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    // == Clear ==
    pub fn clear(&mut self) {
        self.order.clear();
    }
}
