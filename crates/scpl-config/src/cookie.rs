use crate::jwt::JwtConfig;
use crate::server::Environment;

pub const REFRESH_COOKIE_NAME: &str = "refreshToken";
pub const REFRESH_COOKIE_PATH: &str = "/auth";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSitePolicy {
    Strict,
    Lax,
}

/// Attributes of the refresh-token cookie.
///
/// The cookie is always HTTP-only and scoped to the auth routes. Production
/// additionally marks it `Secure` with `SameSite=Strict`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CookieConfig {
    pub name: &'static str,
    pub path: &'static str,
    pub secure: bool,
    pub same_site: SameSitePolicy,
    pub max_age_secs: i64,
}

impl CookieConfig {
    pub fn new(environment: Environment, jwt_config: &JwtConfig) -> Self {
        let production = environment.is_production();
        Self {
            name: REFRESH_COOKIE_NAME,
            path: REFRESH_COOKIE_PATH,
            secure: production,
            same_site: if production {
                SameSitePolicy::Strict
            } else {
                SameSitePolicy::Lax
            },
            max_age_secs: jwt_config.refresh_token_ttl_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_development_cookie() {
        let jwt = JwtConfig::new("s3cret").unwrap();
        let config = CookieConfig::new(Environment::Development, &jwt);
        assert!(!config.secure);
        assert_eq!(config.same_site, SameSitePolicy::Lax);
        assert_eq!(config.max_age_secs, 7 * 24 * 60 * 60);
        assert_eq!(config.path, "/auth");
    }

    #[test]
    fn test_production_cookie_is_strict() {
        let jwt = JwtConfig::new("s3cret").unwrap();
        let config = CookieConfig::new(Environment::Production, &jwt);
        assert!(config.secure);
        assert_eq!(config.same_site, SameSitePolicy::Strict);
    }
}
