#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use scpl::router::init_router;
use scpl::state::AppState;
use scpl_config::{Environment, JwtConfig, RateLimitConfig};
use scpl_core::password::hash_password_with_cost;
use scpl_core::roles::Role;
use scpl_db::Stores;
use scpl_models::{NewUser, User};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "testpass123";
pub const TEST_HASH_COST: u32 = 4;

pub fn test_jwt_config() -> JwtConfig {
    let mut config = JwtConfig::new("integration-test-secret").unwrap();
    config.token_hash_cost = TEST_HASH_COST;
    config
}

/// Fresh in-memory state with rate limiting disabled.
pub fn test_state() -> AppState {
    AppState::new(Stores::in_memory(), test_jwt_config(), Environment::Test)
        .with_rate_limit(RateLimitConfig::disabled())
}

pub fn test_app(state: &AppState) -> Router {
    init_router(state.clone())
}

pub fn generate_unique_email() -> String {
    format!("test-{}@example.com", uuid::Uuid::new_v4())
}

pub async fn create_test_user(state: &AppState, email: &str, roles: Vec<Role>) -> User {
    let hash = hash_password_with_cost(TEST_PASSWORD, TEST_HASH_COST).unwrap();
    state
        .stores
        .users
        .create(NewUser::new("Test User", email, hash, roles))
        .await
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn bearer_request(method: &str, uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn cookie_request(method: &str, uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// The `Set-Cookie` header for the refresh token, if the response has one.
pub fn refresh_set_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("refreshToken="))
        .map(str::to_string)
}

/// `name=value` part of a `Set-Cookie` header, ready for a `Cookie` header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap_or_default().to_string()
}

/// Logs in and returns `(access_token, "refreshToken=...")`.
pub async fn login(app: &Router, email: &str) -> (String, String) {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/auth/login",
            &serde_json::json!({ "email": email, "password": TEST_PASSWORD }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let cookie = cookie_pair(&refresh_set_cookie(&response).unwrap());
    let body = body_json(response).await;
    (body["accessToken"].as_str().unwrap().to_string(), cookie)
}
