use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::health;

pub fn init_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
