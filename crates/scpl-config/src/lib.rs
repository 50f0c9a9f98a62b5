//! # scpl config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`jwt`]: Access/refresh token configuration (`JWT_SECRET` is required)
//! - [`server`]: Port, environment and database settings
//! - [`cookie`]: Refresh-token cookie attributes
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`rate_limit`]: Per-IP rate limiting configuration
//! - [`seed`]: Startup seeding of the admin account
//!
//! Every config has a `from_env()` constructor and a `from_lookup()`
//! constructor taking any `Fn(&str) -> Option<String>`, which tests use
//! instead of mutating the process environment.
//!
//! # Example
//!
//! ```ignore
//! use scpl_config::{JwtConfig, ServerConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let server_config = ServerConfig::from_env()?;
//! ```

pub mod cookie;
pub mod cors;
pub mod error;
pub mod jwt;
pub mod rate_limit;
pub mod seed;
pub mod server;

// Re-export commonly used types at crate root
pub use cookie::{CookieConfig, SameSitePolicy};
pub use cors::CorsConfig;
pub use error::ConfigError;
pub use jwt::JwtConfig;
pub use rate_limit::RateLimitConfig;
pub use seed::SeedConfig;
pub use server::{DatabaseConfig, Environment, ServerConfig};

/// Reads `key` through `lookup` and parses it, falling back to `default`
/// when unset or blank.
pub(crate) fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

pub(crate) fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
pub(crate) fn map_lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: std::collections::HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}
