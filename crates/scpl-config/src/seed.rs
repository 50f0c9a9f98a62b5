use std::fmt;

use crate::env_lookup;

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@example.com";
pub const DEFAULT_ADMIN_NAME: &str = "Admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "Admin@12345";

/// Credentials of the admin account created by the seeder.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedConfig {
    pub admin_email: String,
    pub admin_name: String,
    pub admin_password: String,
}

impl fmt::Debug for SeedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SeedConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_name", &self.admin_name)
            .field("admin_password", &"<redacted>")
            .finish()
    }
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
            admin_name: DEFAULT_ADMIN_NAME.to_string(),
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
        }
    }
}

impl SeedConfig {
    /// Reads `SEED_ADMIN_EMAIL`, `SEED_ADMIN_NAME` and `SEED_ADMIN_PASSWORD`.
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            admin_email: read("SEED_ADMIN_EMAIL", DEFAULT_ADMIN_EMAIL),
            admin_name: read("SEED_ADMIN_NAME", DEFAULT_ADMIN_NAME),
            admin_password: read("SEED_ADMIN_PASSWORD", DEFAULT_ADMIN_PASSWORD),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn test_defaults() {
        assert_eq!(SeedConfig::from_lookup(map_lookup(&[])), SeedConfig::default());
    }

    #[test]
    fn test_override_and_redaction() {
        let config = SeedConfig::from_lookup(map_lookup(&[
            ("SEED_ADMIN_EMAIL", "ops@signage.test"),
            ("SEED_ADMIN_PASSWORD", "hunter22"),
        ]));
        assert_eq!(config.admin_email, "ops@signage.test");
        assert_eq!(config.admin_name, "Admin");
        assert!(!format!("{config:?}").contains("hunter22"));
    }
}
