use axum::Json;
use axum::extract::{Path, State};
use scpl_core::AppError;
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{Screen, ScreenStatus};
use tracing::instrument;

use super::service::ScreenService;
use crate::middleware::role::RequireEditor;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::parse_id;
use crate::state::AppState;
use crate::validator::ValidatedQuery;

/// List screens
#[utoipa::path(
    get,
    path = "/screens",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of screens sorted by name", body = Page<Screen>),
        (status = 400, description = "Invalid query", body = ErrorResponse)
    ),
    tag = "Screens"
)]
#[instrument(skip(state))]
pub async fn list_screens(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<ListQuery>,
) -> Result<Json<Page<Screen>>, AppError> {
    let page = ScreenService::list(state.stores.screens.as_ref(), &query).await?;
    Ok(Json(page))
}

/// Toggle a screen between active and inactive
#[utoipa::path(
    put,
    path = "/screens/{id}",
    params(("id" = String, Path, description = "Screen ID")),
    responses(
        (status = 200, description = "New screen status", body = ScreenStatus),
        (status = 400, description = "Invalid id", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Forbidden - editor role required", body = ErrorResponse),
        (status = 404, description = "Screen not found", body = ErrorResponse)
    ),
    tag = "Screens",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _editor))]
pub async fn toggle_screen(
    State(state): State<AppState>,
    _editor: RequireEditor,
    Path(id): Path<String>,
) -> Result<Json<ScreenStatus>, AppError> {
    let id = parse_id(&id)?;
    let status = ScreenService::toggle(state.stores.screens.as_ref(), id).await?;
    Ok(Json(status))
}
