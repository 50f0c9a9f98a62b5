use std::fmt;
use std::str::FromStr;

use crate::{ConfigError, env_lookup, parse_or};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            _ => Err(ConfigError::Invalid {
                key: "ENVIRONMENT",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub environment: Environment,
    /// Run the seeder on startup.
    pub seed_on_startup: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: Environment::Development,
            seed_on_startup: true,
        }
    }
}

impl ServerConfig {
    /// # Environment Variables
    ///
    /// - `PORT`: default 3000
    /// - `ENVIRONMENT`: `development` (default), `production` or `test`
    /// - `SEED_ON_STARTUP`: default true
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            environment: parse_or(&lookup, "ENVIRONMENT", Environment::Development)?,
            seed_on_startup: parse_or(&lookup, "SEED_ON_STARTUP", true)?,
        })
    }
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .finish()
    }
}

impl DatabaseConfig {
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `DATABASE_MAX_CONNECTIONS`: default 10
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing {
                key: "DATABASE_URL",
            })?;

        Ok(Self {
            url,
            max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn test_server_defaults() {
        let config = ServerConfig::from_lookup(map_lookup(&[])).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn test_production_environment() {
        let config = ServerConfig::from_lookup(map_lookup(&[
            ("ENVIRONMENT", "Production"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert!(config.environment.is_production());
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_lookup(map_lookup(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));
    }

    #[test]
    fn test_database_url_required() {
        let err = DatabaseConfig::from_lookup(map_lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing { key: "DATABASE_URL" });
    }
}
