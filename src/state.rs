use scpl_config::{CookieConfig, CorsConfig, Environment, JwtConfig, RateLimitConfig};
use scpl_db::Stores;

/// Shared, read-only application state handed to every handler.
#[derive(Clone, Debug)]
pub struct AppState {
    pub stores: Stores,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub cors_config: CorsConfig,
    pub rate_limit_config: RateLimitConfig,
    pub environment: Environment,
}

impl AppState {
    /// State with the cookie policy derived from `environment`, CORS
    /// mirroring the request origin and the default rate limit.
    pub fn new(stores: Stores, jwt_config: JwtConfig, environment: Environment) -> Self {
        Self {
            stores,
            cookie_config: CookieConfig::new(environment, &jwt_config),
            jwt_config,
            cors_config: CorsConfig::default(),
            rate_limit_config: RateLimitConfig::default(),
            environment,
        }
    }

    #[must_use]
    pub fn with_cors(mut self, cors_config: CorsConfig) -> Self {
        self.cors_config = cors_config;
        self
    }

    #[must_use]
    pub fn with_rate_limit(mut self, rate_limit_config: RateLimitConfig) -> Self {
        self.rate_limit_config = rate_limit_config;
        self
    }
}
