use crate::env_lookup;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Reads the comma-separated `ALLOWED_ORIGINS` list.
    pub fn from_env() -> Self {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = lookup("ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }

    /// With no explicit list (or `*`), the request origin is echoed back so
    /// credentialed requests from any origin are accepted.
    pub fn mirrors_request_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map_lookup;

    #[test]
    fn test_unset_mirrors_origin() {
        let config = CorsConfig::from_lookup(map_lookup(&[]));
        assert!(config.mirrors_request_origin());
    }

    #[test]
    fn test_explicit_list() {
        let config = CorsConfig::from_lookup(map_lookup(&[(
            "ALLOWED_ORIGINS",
            "http://localhost:5173, https://signage.example.com,",
        )]));
        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:5173", "https://signage.example.com"]
        );
        assert!(!config.mirrors_request_origin());
    }

    #[test]
    fn test_wildcard_mirrors_origin() {
        let config = CorsConfig::from_lookup(map_lookup(&[("ALLOWED_ORIGINS", "*")]));
        assert!(config.mirrors_request_origin());
    }
}
