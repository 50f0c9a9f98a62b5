use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{NewPlaylist, Playlist, PlaylistItem, PlaylistSummary};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::PlaylistStore;

#[derive(Debug, FromRow)]
struct PlaylistRow {
    id: Uuid,
    name: String,
    item_urls: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlaylistRow> for Playlist {
    fn from(row: PlaylistRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            items: row
                .item_urls
                .into_iter()
                .map(|url| PlaylistItem { url })
                .collect(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, FromRow)]
struct PlaylistSummaryRow {
    id: Uuid,
    name: String,
    item_count: i64,
}

impl From<PlaylistSummaryRow> for PlaylistSummary {
    fn from(row: PlaylistSummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            item_count: row.item_count,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgPlaylistStore {
    pool: PgPool,
}

impl PgPlaylistStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlaylistStore for PgPlaylistStore {
    async fn list(&self, query: &ListQuery) -> Result<Page<PlaylistSummary>, StoreError> {
        let search = query.search();

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM playlists WHERE ($1::TEXT IS NULL OR name ~* $1)",
        )
        .bind(search)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_search)?;

        let rows = sqlx::query_as::<_, PlaylistSummaryRow>(
            "SELECT id, name, cardinality(item_urls)::BIGINT AS item_count FROM playlists \
             WHERE ($1::TEXT IS NULL OR name ~* $1) \
             ORDER BY LOWER(name), id LIMIT $2 OFFSET $3",
        )
        .bind(search)
        .bind(query.limit())
        .bind(query.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::from_search)?;

        Ok(Page::new(
            rows.into_iter().map(PlaylistSummary::from).collect(),
            total,
            query,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, StoreError> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            "SELECT id, name, item_urls, created_at, updated_at FROM playlists WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Playlist::from))
    }

    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist, StoreError> {
        let row = sqlx::query_as::<_, PlaylistRow>(
            "INSERT INTO playlists (name, item_urls) VALUES ($1, $2) \
             RETURNING id, name, item_urls, created_at, updated_at",
        )
        .bind(&playlist.name)
        .bind(&playlist.item_urls)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM playlists")
            .fetch_one(&self.pool)
            .await?)
    }
}
