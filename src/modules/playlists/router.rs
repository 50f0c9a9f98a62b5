use crate::state::AppState;
use axum::{Router, routing::get};

use super::controller::{create_playlist, get_playlist, list_playlists};

pub fn init_playlists_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_playlists).post(create_playlist))
        .route("/{id}", get(get_playlist))
}
