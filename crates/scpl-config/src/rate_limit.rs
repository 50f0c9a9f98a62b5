//! Rate limiting configuration.
//!
//! Requests are limited per client IP with a token bucket (via `tower_governor`):
//!
//! - Tokens are replenished one at a time every `replenish_interval_ms`
//! - Each request consumes one token
//! - `burst_size` is the maximum number of tokens that can accumulate
//!
//! The defaults (one token every 500ms, burst of 120) allow 120 requests per
//! minute per client.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_ENABLED`: default true
//! - `RATE_LIMIT_REPLENISH_MS`: default 500
//! - `RATE_LIMIT_BURST_SIZE`: default 120

use tower_governor::governor::{GovernorConfig, GovernorConfigBuilder};
use tower_governor::key_extractor::SmartIpKeyExtractor;

use crate::{ConfigError, env_lookup, parse_or};

/// Governor config keyed by client IP, honouring `X-Forwarded-For`,
/// `X-Real-Ip` and `Forwarded` before falling back to the peer address.
pub type IpGovernorConfig =
    GovernorConfig<SmartIpKeyExtractor, ::governor::middleware::NoOpMiddleware>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Interval after which one token is returned to the bucket.
    pub replenish_interval_ms: u64,
    /// Maximum number of requests accepted in a burst.
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            replenish_interval_ms: 500,
            burst_size: 120,
        }
    }
}

impl RateLimitConfig {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let config = Self {
            enabled: parse_or(&lookup, "RATE_LIMIT_ENABLED", defaults.enabled)?,
            replenish_interval_ms: parse_or(
                &lookup,
                "RATE_LIMIT_REPLENISH_MS",
                defaults.replenish_interval_ms,
            )?,
            burst_size: parse_or(&lookup, "RATE_LIMIT_BURST_SIZE", defaults.burst_size)?,
        };

        if config.replenish_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_REPLENISH_MS",
                value: "0".into(),
            });
        }
        if config.burst_size == 0 {
            return Err(ConfigError::Invalid {
                key: "RATE_LIMIT_BURST_SIZE",
                value: "0".into(),
            });
        }

        Ok(config)
    }

    /// Builds the governor config, or `None` when limiting is disabled or the
    /// quota is degenerate.
    #[must_use]
    pub fn governor_config(&self) -> Option<IpGovernorConfig> {
        if !self.enabled {
            return None;
        }

        GovernorConfigBuilder::default()
            .per_millisecond(self.replenish_interval_ms)
            .burst_size(self.burst_size)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert!(config.enabled);
        assert_eq!(config.replenish_interval_ms, 500);
        assert_eq!(config.burst_size, 120);
        assert!(config.governor_config().is_some());
    }

    #[test]
    fn test_disabled_has_no_governor() {
        assert!(RateLimitConfig::disabled().governor_config().is_none());
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = RateLimitConfig::from_lookup(map_lookup(&[
            ("RATE_LIMIT_ENABLED", "false"),
            ("RATE_LIMIT_BURST_SIZE", "5"),
        ]))
        .unwrap();
        assert!(!config.enabled);
        assert_eq!(config.burst_size, 5);
        assert_eq!(config.replenish_interval_ms, 500);
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err =
            RateLimitConfig::from_lookup(map_lookup(&[("RATE_LIMIT_BURST_SIZE", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "RATE_LIMIT_BURST_SIZE", .. }));
    }
}
