use scpl_core::AppError;
use scpl_core::pagination::{ListQuery, Page};
use scpl_db::PlaylistStore;
use scpl_models::{CreatePlaylistRequest, NewPlaylist, PlaylistDetail, PlaylistSummary};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::track_playlist_created;
use crate::modules::{ensure_valid_search, not_found, store_error};

pub struct PlaylistService;

impl PlaylistService {
    #[instrument(skip(playlists))]
    pub async fn list(
        playlists: &dyn PlaylistStore,
        query: &ListQuery,
    ) -> Result<Page<PlaylistSummary>, AppError> {
        ensure_valid_search(query)?;
        playlists.list(query).await.map_err(store_error)
    }

    /// Stores a validated playlist. Item order is kept as given.
    #[instrument(skip(playlists, dto), fields(name = %dto.name))]
    pub async fn create(
        playlists: &dyn PlaylistStore,
        dto: CreatePlaylistRequest,
    ) -> Result<PlaylistSummary, AppError> {
        let playlist = playlists
            .create(NewPlaylist::from(dto))
            .await
            .map_err(store_error)?;

        track_playlist_created();
        tracing::info!(playlist_id = %playlist.id, items = playlist.items.len(), "Playlist created");

        Ok(PlaylistSummary::from(&playlist))
    }

    #[instrument(skip(playlists))]
    pub async fn get(playlists: &dyn PlaylistStore, id: Uuid) -> Result<PlaylistDetail, AppError> {
        playlists
            .find_by_id(id)
            .await
            .map_err(store_error)?
            .map(PlaylistDetail::from)
            .ok_or_else(not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scpl_db::MemoryPlaylistStore;

    #[tokio::test]
    async fn test_create_then_get_keeps_item_order() {
        let store = MemoryPlaylistStore::default();
        let dto = CreatePlaylistRequest {
            name: "  Morning Loop ".into(),
            item_urls: vec![
                "https://example.com/b.png".into(),
                "https://example.com/a.png".into(),
            ],
        };

        let summary = PlaylistService::create(&store, dto).await.unwrap();
        assert_eq!(summary.name, "Morning Loop");
        assert_eq!(summary.item_count, 2);

        let detail = PlaylistService::get(&store, summary.id).await.unwrap();
        let urls: Vec<&str> = detail.items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(urls, ["https://example.com/b.png", "https://example.com/a.png"]);
    }

    #[tokio::test]
    async fn test_get_unknown_playlist() {
        let store = MemoryPlaylistStore::default();
        let err = PlaylistService::get(&store, Uuid::new_v4()).await.unwrap_err();
        assert_eq!(err.status.as_u16(), 404);
    }
}
