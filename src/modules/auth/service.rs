use std::sync::OnceLock;

use chrono::Utc;
use scpl_auth::{
    RefreshToken, compute_expiry, create_access_token, hash_token, verify_token_hash,
};
use scpl_config::JwtConfig;
use scpl_core::AppError;
use scpl_core::password::{hash_password_with_cost, verify_password};
use scpl_db::{CompareAndSwapOutcome, UserStore};
use scpl_models::{LoginRequest, RefreshSession, User, normalize_email};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_jwt_issued, track_login, track_refresh, track_session_revoked};
use crate::modules::store_error;

const INVALID_CREDENTIALS: &str = "Invalid credentials";
const INVALID_REFRESH_TOKEN: &str = "Invalid refresh token";
const REFRESH_TOKEN_NOT_PROVIDED: &str = "Refresh token not provided";

/// Hash verified against when the email is unknown, so both login failure
/// paths cost one bcrypt verification.
static DUMMY_PASSWORD_HASH: OnceLock<String> = OnceLock::new();

fn dummy_password_hash(cost: u32) -> &'static str {
    DUMMY_PASSWORD_HASH.get_or_init(|| {
        hash_password_with_cost("scpl-dummy-password", cost).unwrap_or_else(|e| {
            tracing::warn!(error = %e.error, "Failed to compute dummy password hash");
            String::new()
        })
    })
}

fn invalid_refresh() -> AppError {
    AppError::unauthorized(INVALID_REFRESH_TOKEN)
}

/// Tokens handed to the client after a login or a rotation. The refresh
/// token only ever leaves the server as a cookie.
#[derive(Debug)]
pub struct IssuedSession {
    pub access_token: String,
    pub refresh_token: RefreshToken,
}

pub struct AuthService;

impl AuthService {
    /// Verifies credentials and opens a session, replacing any previous one.
    ///
    /// Unknown email and wrong password both yield 401 `Invalid credentials`.
    #[instrument(skip_all)]
    pub async fn login(
        users: &dyn UserStore,
        dto: LoginRequest,
        jwt_config: &JwtConfig,
    ) -> Result<IssuedSession, AppError> {
        let email = normalize_email(&dto.email);

        let Some(user) = users.find_by_email(&email).await.map_err(store_error)? else {
            let dummy = dummy_password_hash(jwt_config.token_hash_cost);
            let _ = verify_password(&dto.password, dummy);
            track_login("invalid_credentials");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        };

        if !verify_password(&dto.password, &user.password_hash)? {
            track_login("invalid_credentials");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        let (session, stored) = Self::issue(&user, jwt_config)?;
        users
            .set_refresh_session(user.id, Some(stored))
            .await
            .map_err(store_error)?;

        track_login("success");
        tracing::info!(user_id = %user.id, "User logged in");

        Ok(session)
    }

    /// Exchanges a refresh token for a new access token and a rotated
    /// refresh token.
    ///
    /// The stored session is replaced with a compare-and-swap on the hash
    /// that was verified, so of two concurrent refreshes with the same token
    /// exactly one succeeds.
    #[instrument(skip_all)]
    pub async fn refresh(
        users: &dyn UserStore,
        presented: Option<&str>,
        jwt_config: &JwtConfig,
    ) -> Result<IssuedSession, AppError> {
        let presented = presented
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::unauthorized(REFRESH_TOKEN_NOT_PROVIDED))?;
        let token = RefreshToken::parse(presented).map_err(AppError::bad_request)?;

        let Some(user) = users
            .find_by_id(token.user_id())
            .await
            .map_err(store_error)?
        else {
            track_refresh("unknown");
            return Err(invalid_refresh());
        };

        let Some(current) = user.refresh_session.as_ref() else {
            track_refresh("unknown");
            return Err(invalid_refresh());
        };

        if current.is_expired_at(Utc::now()) {
            users
                .compare_and_swap_refresh(user.id, &current.token_hash, None)
                .await
                .map_err(store_error)?;
            track_refresh("expired");
            tracing::info!(user_id = %user.id, "Expired refresh session cleared");
            return Err(invalid_refresh());
        }

        if !verify_token_hash(token.expose(), &current.token_hash)? {
            track_refresh("mismatch");
            tracing::warn!(user_id = %user.id, "Refresh token does not match stored session");
            return Err(invalid_refresh());
        }

        let (session, replacement) = Self::issue(&user, jwt_config)?;
        let outcome = users
            .compare_and_swap_refresh(user.id, &current.token_hash, Some(replacement))
            .await
            .map_err(store_error)?;

        match outcome {
            CompareAndSwapOutcome::Updated => {
                track_refresh("rotated");
                Ok(session)
            }
            CompareAndSwapOutcome::RefreshMismatch | CompareAndSwapOutcome::Missing => {
                track_refresh("mismatch");
                tracing::warn!(user_id = %user.id, "Refresh session changed during rotation");
                Err(invalid_refresh())
            }
        }
    }

    /// Clears the user's refresh session. A missing user or an empty slot is
    /// not an error.
    #[instrument(skip(users))]
    pub async fn revoke(
        users: &dyn UserStore,
        user_id: Uuid,
        reason: &'static str,
    ) -> Result<(), AppError> {
        let existed = users
            .set_refresh_session(user_id, None)
            .await
            .map_err(store_error)?;

        track_session_revoked(reason);
        tracing::info!(%user_id, existed, "Refresh session revoked");

        Ok(())
    }

    /// Mints an access token and a refresh token for `user`, returning the
    /// session for the client and the record to store.
    fn issue(
        user: &User,
        jwt_config: &JwtConfig,
    ) -> Result<(IssuedSession, RefreshSession), AppError> {
        let access_token = create_access_token(user.id, &user.roles, jwt_config)?;
        track_jwt_issued();

        let refresh_token = RefreshToken::issue(user.id);
        let stored = RefreshSession {
            token_hash: hash_token(refresh_token.expose(), jwt_config.token_hash_cost)?,
            expires_at: compute_expiry(jwt_config.refresh_token_ttl_days),
        };

        Ok((
            IssuedSession {
                access_token,
                refresh_token,
            },
            stored,
        ))
    }
}
