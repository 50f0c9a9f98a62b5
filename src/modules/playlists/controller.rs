use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use scpl_core::AppError;
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{CreatePlaylistRequest, PlaylistDetail, PlaylistSummary};
use tracing::instrument;

use super::service::PlaylistService;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::parse_id;
use crate::state::AppState;
use crate::validator::{ValidatedJson, ValidatedQuery};

/// List playlists
#[utoipa::path(
    get,
    path = "/playlists",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of playlist summaries sorted by name", body = Page<PlaylistSummary>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "Playlists"
)]
#[instrument(skip(state))]
pub async fn list_playlists(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Page<PlaylistSummary>>, AppError> {
    let page = PlaylistService::list(state.stores.playlists.as_ref(), &query).await?;
    Ok(Json(page))
}

/// Create a playlist
#[utoipa::path(
    post,
    path = "/playlists",
    request_body = CreatePlaylistRequest,
    responses(
        (status = 201, description = "Playlist created", body = PlaylistSummary),
        (status = 400, description = "Invalid input", body = ErrorResponse)
    ),
    tag = "Playlists"
)]
#[instrument(skip(state, dto))]
pub async fn create_playlist(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<CreatePlaylistRequest>,
) -> Result<(StatusCode, Json<PlaylistSummary>), AppError> {
    let summary = PlaylistService::create(state.stores.playlists.as_ref(), dto).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// Get a playlist with its items
#[utoipa::path(
    get,
    path = "/playlists/{id}",
    params(("id" = String, Path, description = "Playlist ID")),
    responses(
        (status = 200, description = "Playlist with ordered items", body = PlaylistDetail),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 404, description = "Playlist not found", body = ErrorResponse)
    ),
    tag = "Playlists"
)]
#[instrument(skip(state))]
pub async fn get_playlist(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlaylistDetail>, AppError> {
    let id = parse_id(&id)?;
    let playlist = PlaylistService::get(state.stores.playlists.as_ref(), id).await?;
    Ok(Json(playlist))
}
