use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{NewScreen, Screen};
use uuid::Uuid;

use super::paginate;
use crate::error::StoreError;
use crate::store::ScreenStore;

#[derive(Clone, Debug, Default)]
pub struct MemoryScreenStore(Arc<RwLock<HashMap<Uuid, Screen>>>);

#[async_trait]
impl ScreenStore for MemoryScreenStore {
    async fn list(&self, query: &ListQuery) -> Result<Page<Screen>, StoreError> {
        let guard = self.0.read();
        paginate(
            guard.values(),
            query,
            |s| (s.name.as_str(), s.id),
            Screen::clone,
        )
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screen>, StoreError> {
        Ok(self.0.read().get(&id).cloned())
    }

    async fn toggle_active(&self, id: Uuid) -> Result<Option<Screen>, StoreError> {
        let mut guard = self.0.write();
        Ok(guard.get_mut(&id).map(|screen| {
            screen.is_active = !screen.is_active;
            screen.updated_at = Utc::now();
            screen.clone()
        }))
    }

    async fn insert(&self, screen: NewScreen) -> Result<Screen, StoreError> {
        let now = Utc::now();
        let record = Screen {
            id: Uuid::new_v4(),
            name: screen.name,
            is_active: screen.is_active,
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

    async fn store_with(names: &[(&str, bool)]) -> MemoryScreenStore {
        let store = MemoryScreenStore::default();
        for (name, active) in names {
            store.insert(NewScreen::new(name, *active)).await.unwrap();
        }
        store
    }

    fn names(page: &Page<Screen>) -> Vec<&str> {
        page.items.iter().map(|s| s.name.as_str()).collect()
    }

    #[tokio::test]
    async fn test_list_sorted_case_insensitively() {
        let store = store_with(&[("reception", true), ("Main Lobby", true), ("Conference Room A", false)]).await;
        let page = store.list(&ListQuery::default()).await.unwrap();
        assert_eq!(names(&page), vec!["Conference Room A", "Main Lobby", "reception"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn test_list_search_and_paging() {
        let store = store_with(&[("Lobby 1", true), ("lobby 2", true), ("Kitchen", true), ("LOBBY 3", true)]).await;
        let query = ListQuery {
            search: Some("lobby".into()),
            page: Some(2),
            limit: Some(2),
        };
        let page = store.list(&query).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 2);
        assert_eq!(names(&page), vec!["LOBBY 3"]);
    }

    #[tokio::test]
    async fn test_list_page_past_end_is_empty() {
        let store = store_with(&[("Lobby", true)]).await;
        let query = ListQuery {
            search: None,
            page: Some(i64::MAX),
            limit: Some(100),
        };
        let page = store.list(&query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_list_invalid_pattern() {
        let store = store_with(&[("Lobby", true)]).await;
        let query = ListQuery {
            search: Some("[".into()),
            ..Default::default()
        };
        assert!(matches!(
            store.list(&query).await.unwrap_err(),
            StoreError::InvalidPattern(_)
        ));
    }

    #[tokio::test]
    async fn test_toggle_flips_and_returns() {
        let store = store_with(&[("Lobby", true)]).await;
        let id = store.list(&ListQuery::default()).await.unwrap().items[0].id;

        assert!(!store.toggle_active(id).await.unwrap().unwrap().is_active);
        assert!(store.toggle_active(id).await.unwrap().unwrap().is_active);
        assert!(store.toggle_active(Uuid::new_v4()).await.unwrap().is_none());
    }
}
