use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{NewScreen, Screen};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::ScreenStore;

#[derive(Debug, FromRow)]
struct ScreenRow {
    id: Uuid,
    name: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScreenRow> for Screen {
    fn from(row: ScreenRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PgScreenStore {
    pool: PgPool,
}

impl PgScreenStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScreenStore for PgScreenStore {
    async fn list(&self, query: &ListQuery) -> Result<Page<Screen>, StoreError> {
        let search = query.search();

        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM screens WHERE ($1::TEXT IS NULL OR name ~* $1)")
                .bind(search)
                .fetch_one(&self.pool)
                .await
                .map_err(StoreError::from_search)?;

        let rows = sqlx::query_as::<_, ScreenRow>(
            "SELECT id, name, is_active, created_at, updated_at FROM screens \
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
            rows.into_iter().map(Screen::from).collect(),
            total,
            query,
        ))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screen>, StoreError> {
        let row = sqlx::query_as::<_, ScreenRow>(
            "SELECT id, name, is_active, created_at, updated_at FROM screens WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Screen::from))
    }

    async fn toggle_active(&self, id: Uuid) -> Result<Option<Screen>, StoreError> {
        let row = sqlx::query_as::<_, ScreenRow>(
            "UPDATE screens SET is_active = NOT is_active, updated_at = NOW() WHERE id = $1 \
             RETURNING id, name, is_active, created_at, updated_at",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Screen::from))
    }

    async fn insert(&self, screen: NewScreen) -> Result<Screen, StoreError> {
        let row = sqlx::query_as::<_, ScreenRow>(
            "INSERT INTO screens (name, is_active) VALUES ($1, $2) \
             RETURNING id, name, is_active, created_at, updated_at",
        )
        .bind(&screen.name)
        .bind(screen.is_active)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn count(&self) -> Result<i64, StoreError> {
        Ok(sqlx::query_scalar("SELECT COUNT(*) FROM screens")
            .fetch_one(&self.pool)
            .await?)
    }
}
