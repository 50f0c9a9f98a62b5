use std::fmt;

use crate::{ConfigError, env_lookup, parse_or};

pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;
pub const DEFAULT_REFRESH_TOKEN_TTL_DAYS: i64 = 7;
pub const MAX_ACCESS_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;
pub const MAX_REFRESH_TOKEN_TTL_DAYS: i64 = 3650;
/// bcrypt cost used for refresh-token hashes.
pub const DEFAULT_TOKEN_HASH_COST: u32 = 12;

#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds.
    pub access_token_ttl: i64,
    /// Refresh token lifetime in days.
    pub refresh_token_ttl_days: i64,
    pub token_hash_cost: u32,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl_days", &self.refresh_token_ttl_days)
            .field("token_hash_cost", &self.token_hash_cost)
            .finish()
    }
}

impl JwtConfig {
    /// Config with default lifetimes. The secret must be non-empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(ConfigError::Missing { key: "JWT_SECRET" });
        }

        Ok(Self {
            secret,
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL_SECS,
            refresh_token_ttl_days: DEFAULT_REFRESH_TOKEN_TTL_DAYS,
            token_hash_cost: DEFAULT_TOKEN_HASH_COST,
        })
    }

    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC signing secret (required)
    /// - `ACCESS_TOKEN_TTL`: e.g. `15m`, `1h`, `900` (default `15m`, at most `365d`)
    /// - `REFRESH_TOKEN_TTL_DAYS`: default 7, at most 3650
    /// - `TOKEN_HASH_COST`: bcrypt cost for refresh-token hashes, default 12
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(lookup("JWT_SECRET").unwrap_or_default())?;

        if let Some(raw) = lookup("ACCESS_TOKEN_TTL").filter(|v| !v.trim().is_empty()) {
            config.access_token_ttl = parse_duration_secs(&raw)
                .filter(|secs| (1..=MAX_ACCESS_TOKEN_TTL_SECS).contains(secs))
                .ok_or(ConfigError::Invalid {
                    key: "ACCESS_TOKEN_TTL",
                    value: raw,
                })?;
        }

        config.refresh_token_ttl_days = parse_or(
            &lookup,
            "REFRESH_TOKEN_TTL_DAYS",
            DEFAULT_REFRESH_TOKEN_TTL_DAYS,
        )?;
        if !(1..=MAX_REFRESH_TOKEN_TTL_DAYS).contains(&config.refresh_token_ttl_days) {
            return Err(ConfigError::Invalid {
                key: "REFRESH_TOKEN_TTL_DAYS",
                value: config.refresh_token_ttl_days.to_string(),
            });
        }

        config.token_hash_cost = parse_or(&lookup, "TOKEN_HASH_COST", DEFAULT_TOKEN_HASH_COST)?;
        if !(4..=31).contains(&config.token_hash_cost) {
            return Err(ConfigError::Invalid {
                key: "TOKEN_HASH_COST",
                value: config.token_hash_cost.to_string(),
            });
        }

        Ok(config)
    }

    pub fn refresh_token_ttl_secs(&self) -> i64 {
        self.refresh_token_ttl_days * 24 * 60 * 60
    }
}

/// Parses `30s`, `15m`, `1h`, `7d` or a bare number of seconds.
pub fn parse_duration_secs(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, multiplier) = match raw.chars().last()? {
        's' => (&raw[..raw.len() - 1], 1),
        'm' => (&raw[..raw.len() - 1], 60),
        'h' => (&raw[..raw.len() - 1], 60 * 60),
        'd' => (&raw[..raw.len() - 1], 24 * 60 * 60),
        _ => (raw, 1),
    };

    digits.trim().parse::<i64>().ok()?.checked_mul(multiplier)
}
