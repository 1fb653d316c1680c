//! Configuration Module
//!
//! Loads cache tuning parameters from environment variables.

use std::env;
use std::time::Duration;

use crate::error::{CacheError, Result};

/// Default time-to-live for cached values (5 minutes).
pub const DEFAULT_TTL_MS: u64 = 5 * 60 * 1000;

/// Default interval between background sweeps (10 minutes).
pub const DEFAULT_CLEANUP_INTERVAL_MS: u64 = 10 * 60 * 1000;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// TTL in milliseconds applied when a caller does not supply one
    pub default_ttl_ms: u64,
    /// Background sweep interval in milliseconds
    pub cleanup_interval_ms: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `QUERY_CACHE_DEFAULT_TTL_MS` - Default TTL (default: 300000)
    /// - `QUERY_CACHE_CLEANUP_INTERVAL_MS` - Sweep frequency (default: 600000)
    ///
    /// Missing or unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self {
            default_ttl_ms: env::var("QUERY_CACHE_DEFAULT_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_MS),
            cleanup_interval_ms: env::var("QUERY_CACHE_CLEANUP_INTERVAL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CLEANUP_INTERVAL_MS),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_millis(self.cleanup_interval_ms)
    }

    /// Rejects settings the sweeper cannot run with.
    ///
    /// A zero default TTL is allowed: every entry is then expired on arrival.
    pub fn validate(&self) -> Result<()> {
        if self.cleanup_interval_ms == 0 {
            return Err(CacheError::InvalidConfig(
                "cleanup interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl_ms: DEFAULT_TTL_MS,
            cleanup_interval_ms: DEFAULT_CLEANUP_INTERVAL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.default_ttl(), Duration::from_secs(300));
        assert_eq!(config.cleanup_interval(), Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("QUERY_CACHE_DEFAULT_TTL_MS", "1500");
        env::set_var("QUERY_CACHE_CLEANUP_INTERVAL_MS", "not-a-number");

        let config = Config::from_env();
        assert_eq!(config.default_ttl_ms, 1500);
        assert_eq!(config.cleanup_interval_ms, DEFAULT_CLEANUP_INTERVAL_MS);

        env::remove_var("QUERY_CACHE_DEFAULT_TTL_MS");
        env::remove_var("QUERY_CACHE_CLEANUP_INTERVAL_MS");
    }

    #[test]
    fn test_zero_cleanup_interval_is_rejected() {
        let config = Config {
            default_ttl_ms: 0,
            cleanup_interval_ms: 0,
        };
        assert!(matches!(
            config.validate(),
            Err(CacheError::InvalidConfig(_))
        ));
    }
}
