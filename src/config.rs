//! Configuration Module
//!
//! Typed construction parameters for a cache instance, with optional
//! overrides loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cache::EvictionStrategy;
use crate::error::{CacheError, Result};

/// Cache construction parameters.
///
/// `ttl` and `max_size` have no implicit defaults: every cache instance is
/// sized and timed by its owner. Serialized form uses camelCase names and
/// milliseconds for `ttl`, e.g. `{"ttl": 60000, "maxSize": 100, "strategy": "lru"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheConfig {
    /// Default TTL applied when `set` does not specify one
    #[serde(with = "duration_ms")]
    pub ttl: Duration,
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Eviction strategy used when `max_size` would be exceeded
    #[serde(default)]
    pub strategy: EvictionStrategy,
}

impl CacheConfig {
    /// Creates a config using the default (LRU) eviction strategy.
    pub fn new(ttl: Duration, max_size: usize) -> Self {
        Self {
            ttl,
            max_size,
            strategy: EvictionStrategy::default(),
        }
    }

    /// Replaces the eviction strategy.
    pub fn with_strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Checks that the parameters describe a usable cache.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be greater than zero".to_string(),
            ));
        }
        if self.ttl.as_millis() == 0 {
            return Err(CacheError::InvalidConfig(format!(
                "ttl must be at least 1ms, got {:?}",
                self.ttl
            )));
        }
        Ok(())
    }

    /// Creates a config from environment variables, falling back to `defaults`.
    ///
    /// # Environment Variables
    /// - `{PREFIX}_CACHE_TTL_MS` - Default TTL in milliseconds
    /// - `{PREFIX}_CACHE_MAX_SIZE` - Maximum number of entries
    /// - `{PREFIX}_CACHE_STRATEGY` - `lru`, `fifo` or `lfu`
    ///
    /// Values that fail to parse are ignored. The result is not validated;
    /// cache construction does that.
    pub fn from_env(prefix: &str, defaults: CacheConfig) -> Self {
        let prefix = prefix.to_ascii_uppercase();
        Self {
            ttl: env_override::<u64>(&format!("{}_CACHE_TTL_MS", prefix))
                .map(Duration::from_millis)
                .unwrap_or(defaults.ttl),
            max_size: env_override(&format!("{}_CACHE_MAX_SIZE", prefix))
                .unwrap_or(defaults.max_size),
            strategy: env_override(&format!("{}_CACHE_STRATEGY", prefix))
                .unwrap_or(defaults.strategy),
        }
    }
}

fn env_override<T>(name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env::var(name).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(var = name, value = %raw, error = %e, "Ignoring unparsable cache setting");
            None
        }
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ttl: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(crate::cache::duration_to_ms(*ttl))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> CacheConfig {
        CacheConfig::new(Duration::from_secs(300), 1000)
    }

    #[test]
    fn test_config_new_uses_lru() {
        let config = defaults();
        assert_eq!(config.ttl, Duration::from_secs(300));
        assert_eq!(config.max_size, 1000);
        assert_eq!(config.strategy, EvictionStrategy::Lru);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_with_strategy() {
        let config = defaults().with_strategy(EvictionStrategy::Lfu);
        assert_eq!(config.strategy, EvictionStrategy::Lfu);
    }

    #[test]
    fn test_validate_rejects_zero_max_size() {
        let config = CacheConfig::new(Duration::from_secs(1), 0);
        assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_sub_millisecond_ttl() {
        for ttl in [Duration::ZERO, Duration::from_micros(999)] {
            let config = CacheConfig::new(ttl, 10);
            assert!(matches!(config.validate(), Err(CacheError::InvalidConfig(_))));
        }
    }

    #[test]
    fn test_config_serializes_huge_ttl_as_max() {
        let config = CacheConfig::new(Duration::from_secs(18_446_744_073_709_552), 10);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["ttl"], serde_json::json!(u64::MAX));
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("CFGDEFAULT_CACHE_TTL_MS");
        env::remove_var("CFGDEFAULT_CACHE_MAX_SIZE");
        env::remove_var("CFGDEFAULT_CACHE_STRATEGY");

        let config = CacheConfig::from_env("cfgdefault", defaults());
        assert_eq!(config, defaults());
    }

    #[test]
    fn test_config_from_env_overrides() {
        env::set_var("CFGOVERRIDE_CACHE_TTL_MS", "1500");
        env::set_var("CFGOVERRIDE_CACHE_MAX_SIZE", "42");
        env::set_var("CFGOVERRIDE_CACHE_STRATEGY", "FIFO");

        let config = CacheConfig::from_env("cfgoverride", defaults());
        assert_eq!(config.ttl, Duration::from_millis(1500));
        assert_eq!(config.max_size, 42);
        assert_eq!(config.strategy, EvictionStrategy::Fifo);
    }

    #[test]
    fn test_config_from_env_ignores_garbage() {
        env::set_var("CFGGARBAGE_CACHE_TTL_MS", "soon");
        env::set_var("CFGGARBAGE_CACHE_MAX_SIZE", "-3");
        env::set_var("CFGGARBAGE_CACHE_STRATEGY", "random");

        let config = CacheConfig::from_env("cfggarbage", defaults());
        assert_eq!(config, defaults());
    }
}
