use scpl_core::AppError;
use scpl_core::pagination::{ListQuery, Page};
use scpl_db::ScreenStore;
use scpl_models::{Screen, ScreenStatus};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_screen_toggled;
use crate::modules::{ensure_valid_search, not_found, store_error};

pub struct ScreenService;

impl ScreenService {
    #[instrument(skip(screens))]
    pub async fn list(screens: &dyn ScreenStore, query: &ListQuery) -> Result<Page<Screen>, AppError> {
        ensure_valid_search(query)?;
        screens.list(query).await.map_err(store_error)
    }

    #[instrument(skip(screens))]
    pub async fn toggle(screens: &dyn ScreenStore, id: Uuid) -> Result<ScreenStatus, AppError> {
        let screen = screens
            .toggle_active(id)
            .await
            .map_err(store_error)?
            .ok_or_else(not_found)?;

        track_screen_toggled(screen.is_active);
        tracing::info!(screen_id = %screen.id, is_active = screen.is_active, "Screen toggled");

        Ok(ScreenStatus::from(&screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scpl_db::MemoryScreenStore;
    use scpl_models::NewScreen;
    use crate::validator::INVALID_QUERY;

    #[tokio::test]
    async fn test_invalid_search_is_rejected() {
        let store = MemoryScreenStore::default();
        let query = ListQuery {
            search: Some("(lobby".into()),
            ..Default::default()
        };

        let err = ScreenService::list(&store, &query).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.message(), INVALID_QUERY);
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let store = MemoryScreenStore::default();
        let screen = store.insert(NewScreen::new("Reception", true)).await.unwrap();

        let first = ScreenService::toggle(&store, screen.id).await.unwrap();
        assert!(!first.is_active);
        let second = ScreenService::toggle(&store, screen.id).await.unwrap();
        assert!(second.is_active);
    }

    #[tokio::test]
    async fn test_toggle_unknown_screen() {
        let store = MemoryScreenStore::default();
        let err = ScreenService::toggle(&store, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
        assert_eq!(err.message(), "Not found");
    }
}
