//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! Every variant is a caller contract violation. A lookup that finds nothing
//! is not an error: it is reported as `None` / `false`.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Key is empty or otherwise unaddressable
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// TTL would produce an already-expired entry
    #[error("Invalid TTL: {0}")]
    InvalidTtl(String),

    /// Construction parameters are out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Eviction strategy identifier is not recognized
    #[error("Unknown eviction strategy: {0}")]
    UnknownStrategy(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
