//! Access token creation and verification.
//!
//! Access tokens are HS256 JWTs signed with `JWT_SECRET`. They carry the user
//! id and roles, and are verified by signature and expiry only.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use scpl_config::JwtConfig;
use scpl_core::AppError;
use scpl_core::roles::Role;

use crate::claims::Claims;

/// Creates a signed access token embedding the user id and roles.
///
/// # Errors
///
/// Returns an internal error if token encoding fails.
pub fn create_access_token(
    user_id: Uuid,
    roles: &[Role],
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + jwt_config.access_token_ttl as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        roles: roles.to_vec(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {e}")))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns 401 `Invalid token` when the signature is invalid, the token has
/// expired, or it is malformed.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid token"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig::new("test-secret").unwrap()
    }

    #[test]
    fn test_round_trip_preserves_identity() {
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, &[Role::Editor], &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.roles, vec![Role::Editor]);
        assert_eq!(claims.exp - claims.iat, 900);
    }

    #[test]
    fn test_tokens_issued_together_differ() {
        let user_id = Uuid::new_v4();
        let first = create_access_token(user_id, &[Role::Viewer], &config()).unwrap();
        let second = create_access_token(user_id, &[Role::Viewer], &config()).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_access_token(Uuid::new_v4(), &[], &config()).unwrap();
        let other = JwtConfig::new("another-secret").unwrap();
        let err = verify_token(&token, &other).unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
        assert_eq!(err.message(), "Invalid token");
    }

    #[test]
    fn test_expired_token_rejected() {
        let now = Utc::now().timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            roles: vec![Role::Admin],
            exp: now - 10,
            iat: now - 100,
            jti: "expired".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(verify_token(&token, &config()).is_err());
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(verify_token("not.a.jwt", &config()).is_err());
        assert!(verify_token("", &config()).is_err());
    }
}
