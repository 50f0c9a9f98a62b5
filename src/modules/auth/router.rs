use crate::state::AppState;
use axum::{Router, routing::post};

use super::controller::{login, logout, refresh, revoke_all};

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/revoke-all", post(revoke_all))
}
