//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL and ranking metadata.

use crate::cache::rank::Rank;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
///
/// Timestamps come from the owning cache's [`Clock`](crate::cache::Clock).
/// Sequence numbers come from a per-cache counter that advances on every
/// insertion and every hit, giving a strict order below clock resolution.
#[derive(Debug, Clone)]
pub(crate) struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Time of first insertion (ms)
    pub created_at: u64,
    /// Time at and after which the entry is expired (ms)
    pub expires_at: u64,
    /// Time of the last insertion, overwrite or hit (ms)
    pub last_accessed_at: u64,
    /// Sequence number of the first insertion
    pub inserted_seq: u64,
    /// Sequence number of the last insertion, overwrite or hit
    pub accessed_seq: u64,
    /// Hits since the last insertion or overwrite
    pub hits: u64,
    /// Current position in the eviction index
    pub rank: Rank,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_ms` after `now`.
    pub fn new(value: V, now: u64, ttl_ms: u64, seq: u64) -> Self {
        Self {
            value,
            created_at: now,
            expires_at: now.saturating_add(ttl_ms),
            last_accessed_at: now,
            inserted_seq: seq,
            accessed_seq: seq,
            hits: 0,
            rank: (0, 0),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: the entry is expired once `now` reaches
    /// `expires_at`, so a TTL that has fully elapsed is never served.
    pub fn is_expired_at(&self, now: u64) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, 0 once expired.
    pub fn ttl_remaining_ms(&self, now: u64) -> u64 {
        self.expires_at.saturating_sub(now)
    }

    // == Touch ==
    /// Records a hit.
    pub fn touch(&mut self, now: u64, seq: u64) {
        self.last_accessed_at = self.last_accessed_at.max(now);
        self.accessed_seq = seq;
        self.hits += 1;
        debug_assert!(self.last_accessed_at >= self.created_at);
    }

    // == Replace ==
    /// Overwrites the value and expiry. Insertion identity is kept.
    pub fn replace(&mut self, value: V, now: u64, ttl_ms: u64, seq: u64) {
        self.value = value;
        self.expires_at = now.saturating_add(ttl_ms);
        self.last_accessed_at = self.last_accessed_at.max(now);
        self.accessed_seq = seq;
        self.hits = 0;
    }
}
