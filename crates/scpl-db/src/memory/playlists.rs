use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{NewPlaylist, Playlist, PlaylistItem, PlaylistSummary};
use uuid::Uuid;

use super::paginate;
use crate::error::StoreError;
use crate::store::PlaylistStore;

#[derive(Clone, Debug, Default)]
pub struct MemoryPlaylistStore(Arc<RwLock<HashMap<Uuid, Playlist>>>);

#[async_trait]
impl PlaylistStore for MemoryPlaylistStore {
    async fn list(&self, query: &ListQuery) -> Result<Page<PlaylistSummary>, StoreError> {
        let guard = self.0.read();
        paginate(
            guard.values(),
            query,
            |p| (p.name.as_str(), p.id),
            PlaylistSummary::from,
        )
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, StoreError> {
        Ok(self.0.read().get(&id).cloned())
    }

    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist, StoreError> {
        let now = Utc::now();
        let record = Playlist {
            id: Uuid::new_v4(),
            name: playlist.name,
            items: playlist
                .item_urls
                .into_iter()
                .map(|url| PlaylistItem { url })
                .collect(),
            created_at: now,
            updated_at: now,
        };
        self.0.write().insert(record.id, record.clone());
        Ok(record)
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(self.0.read().len() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_preserves_item_order() {
        let store = MemoryPlaylistStore::default();
        let urls = vec![
            "https://example.com/media/b.png".to_string(),
            "https://example.com/media/a.png".to_string(),
        ];
        let created = store
            .create(NewPlaylist::new("Loop", urls.clone()))
            .await
            .unwrap();

        let fetched = store.find_by_id(created.id).await.unwrap().unwrap();
        let fetched_urls: Vec<String> = fetched.items.into_iter().map(|i| i.url).collect();
        assert_eq!(fetched_urls, urls);
    }

    #[tokio::test]
    async fn test_list_returns_summaries() {
        let store = MemoryPlaylistStore::default();
        store
            .create(NewPlaylist::new("welcome", vec!["https://e.com/1".into()]))
            .await
            .unwrap();
        store
            .create(NewPlaylist::new("Announcements", vec![]))
            .await
            .unwrap();

        let page = store.list(&ListQuery::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].name, "Announcements");
        assert_eq!(page.items[0].item_count, 0);
        assert_eq!(page.items[1].item_count, 1);
        assert_eq!(store.count().await.unwrap(), 2);
    }
}
