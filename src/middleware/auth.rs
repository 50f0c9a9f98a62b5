use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use scpl_auth::{Claims, verify_token};
use scpl_core::AppError;
use scpl_core::roles::Role;
use uuid::Uuid;

use crate::state::AppState;

/// Extractor that validates the bearer JWT and provides the caller's claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The user id carried in `sub`.
    pub fn user_id(&self) -> Result<Uuid, AppError> {
        Uuid::parse_str(&self.0.sub).map_err(|_| AppError::unauthorized("Invalid token"))
    }

    pub fn roles(&self) -> &[Role] {
        &self.0.roles
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))?;

        let claims = verify_token(token, &state.jwt_config)?;

        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> Claims {
        Claims {
            sub: sub.to_string(),
            roles: vec![Role::Viewer],
            exp: 9999999999,
            iat: 1234567890,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_user_id() {
        let user_id = Uuid::new_v4();
        let auth_user = AuthUser(claims(&user_id.to_string()));
        assert_eq!(auth_user.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_user_id_rejects_non_uuid_subject() {
        let auth_user = AuthUser(claims("not-a-uuid"));
        let err = auth_user.user_id().unwrap_err();
        assert_eq!(err.status.as_u16(), 401);
    }
}
