//! # scpl auth
//!
//! Token issuing for the signage backend.
//!
//! - [`claims`]: Access token claim structure
//! - [`jwt`]: Access token creation and verification (HS256)
//! - [`refresh`]: Opaque refresh tokens, their hashing and expiry
//!
//! # Token Types
//!
//! - **Access Token** ([`Claims`]): short-lived signed token carrying the user
//!   id and roles, verified without a database lookup
//! - **Refresh Token** ([`RefreshToken`]): long-lived opaque `<user id>.<secret>`
//!   string, stored server-side only as a bcrypt hash
//!
//! # Example
//!
//! ```ignore
//! use scpl_auth::{RefreshToken, create_access_token, verify_token};
//! use scpl_config::JwtConfig;
//!
//! let config = JwtConfig::from_env()?;
//! let access = create_access_token(user_id, &roles, &config)?;
//! let claims = verify_token(&access, &config)?;
//!
//! let refresh = RefreshToken::issue(user_id);
//! let hash = hash_token(refresh.expose(), config.token_hash_cost)?;
//! ```

pub mod claims;
pub mod jwt;
pub mod refresh;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
pub use refresh::{
    DEFAULT_OPAQUE_TOKEN_BYTES, REFRESH_SECRET_BYTES, RefreshToken, RefreshTokenError,
    compute_expiry, generate_opaque_token, hash_token, verify_token_hash,
};
