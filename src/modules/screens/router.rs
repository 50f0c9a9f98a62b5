use crate::state::AppState;
use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{list_screens, toggle_screen};

pub fn init_screens_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_screens))
        .route("/{id}", put(toggle_screen))
}
