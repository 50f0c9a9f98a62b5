use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use scpl_auth::RefreshToken;
use scpl_config::{CookieConfig, SameSitePolicy};
use scpl_core::AppError;
use scpl_models::{AccessTokenResponse, LoginRequest, MessageResponse};
use tracing::instrument;
use utoipa::ToSchema;

use super::service::AuthService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// Error body returned by every endpoint.
#[derive(ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    /// Per-field validation messages, when applicable
    pub errors: Option<serde_json::Value>,
}

fn refresh_cookie(config: &CookieConfig, token: &RefreshToken) -> Cookie<'static> {
    Cookie::build((config.name, token.expose().to_string()))
        .http_only(true)
        .secure(config.secure)
        .same_site(match config.same_site {
            SameSitePolicy::Strict => SameSite::Strict,
            SameSitePolicy::Lax => SameSite::Lax,
        })
        .path(config.path)
        .max_age(time::Duration::seconds(config.max_age_secs))
        .build()
}

fn clear_refresh_cookie(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.remove(Cookie::build(config.name).path(config.path))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, refresh cookie set", body = AccessTokenResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 429, description = "Too many requests")
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AccessTokenResponse>), AppError> {
    let session = AuthService::login(state.stores.users.as_ref(), dto, &state.jwt_config).await?;

    let jar = jar.add(refresh_cookie(&state.cookie_config, &session.refresh_token));
    Ok((
        jar,
        Json(AccessTokenResponse {
            access_token: session.access_token,
        }),
    ))
}

/// Rotate the refresh cookie and obtain a new access token
#[utoipa::path(
    post,
    path = "/auth/refresh",
    responses(
        (status = 200, description = "Tokens rotated, new refresh cookie set", body = AccessTokenResponse),
        (status = 400, description = "Malformed refresh token", body = ErrorResponse),
        (status = 401, description = "Refresh token missing, invalid or expired", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AccessTokenResponse>), AppError> {
    let presented = jar
        .get(state.cookie_config.name)
        .map(|cookie| cookie.value().to_string());

    let session = AuthService::refresh(
        state.stores.users.as_ref(),
        presented.as_deref(),
        &state.jwt_config,
    )
    .await?;

    let jar = jar.add(refresh_cookie(&state.cookie_config, &session.refresh_token));
    Ok((
        jar,
        Json(AccessTokenResponse {
            access_token: session.access_token,
        }),
    ))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 204, description = "Session cleared, refresh cookie removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, StatusCode), AppError> {
    AuthService::revoke(state.stores.users.as_ref(), auth_user.user_id()?, "logout").await?;

    Ok((
        clear_refresh_cookie(jar, &state.cookie_config),
        StatusCode::NO_CONTENT,
    ))
}

/// Revoke every refresh token of the caller
#[utoipa::path(
    post,
    path = "/auth/revoke-all",
    responses(
        (status = 200, description = "All tokens revoked", body = MessageResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    tag = "Authentication",
    security(("bearer_auth" = []))
)]
#[instrument(skip_all)]
pub async fn revoke_all(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> Result<(CookieJar, Json<MessageResponse>), AppError> {
    AuthService::revoke(
        state.stores.users.as_ref(),
        auth_user.user_id()?,
        "revoke_all",
    )
    .await?;

    Ok((
        clear_refresh_cookie(jar, &state.cookie_config),
        Json(MessageResponse::new("All tokens revoked successfully")),
    ))
}
