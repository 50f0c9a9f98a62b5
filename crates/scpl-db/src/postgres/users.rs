use async_trait::async_trait;
use chrono::{DateTime, Utc};
use scpl_core::roles::Role;
use scpl_models::{NewUser, RefreshSession, User};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::{CompareAndSwapOutcome, UserStore};

const USER_COLUMNS: &str = "id, name, email, password_hash, roles, refresh_token_hash, \
     refresh_token_expires_at, created_at, updated_at";

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    roles: Vec<String>,
    refresh_token_hash: Option<String>,
    refresh_token_expires_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let roles = row
            .roles
            .iter()
            .map(|r| r.parse::<Role>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StoreError::Corrupt(format!("user {}: {e}", row.id)))?;

        let refresh_session = match (row.refresh_token_hash, row.refresh_token_expires_at) {
            (Some(token_hash), Some(expires_at)) => Some(RefreshSession {
                token_hash,
                expires_at,
            }),
            (None, None) => None,
            _ => {
                return Err(StoreError::Corrupt(format!(
                    "user {}: partial refresh session",
                    row.id
                )));
            }
        };

        Ok(User {
            id: row.id,
            name: row.name,
            email: row.email,
            password_hash: row.password_hash,
            roles,
            refresh_session,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn role_names(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|r| r.as_str().to_string()).collect()
}

fn session_parts(session: Option<RefreshSession>) -> (Option<String>, Option<DateTime<Utc>>) {
    match session {
        Some(s) => (Some(s.token_hash), Some(s.expires_at)),
        None => (None, None),
    }
}

#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn create(&self, user: NewUser) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "INSERT INTO users (name, email, password_hash, roles) \
             VALUES ($1, $2, $3, $4) RETURNING {USER_COLUMNS}"
        ))
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(role_names(&user.roles))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(format!("email {} already exists", user.email))
            }
            other => StoreError::Database(other),
        })?;

        User::try_from(row)
    }

    async fn set_refresh_session(
        &self,
        id: Uuid,
        session: Option<RefreshSession>,
    ) -> Result<bool, StoreError> {
        let (hash, expires_at) = session_parts(session);
        let result = sqlx::query(
            "UPDATE users SET refresh_token_hash = $2, refresh_token_expires_at = $3, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn compare_and_swap_refresh(
        &self,
        id: Uuid,
        expected_hash: &str,
        replacement: Option<RefreshSession>,
    ) -> Result<CompareAndSwapOutcome, StoreError> {
        let (hash, expires_at) = session_parts(replacement);
        let result = sqlx::query(
            "UPDATE users SET refresh_token_hash = $3, refresh_token_expires_at = $4, \
             updated_at = NOW() WHERE id = $1 AND refresh_token_hash = $2",
        )
        .bind(id)
        .bind(expected_hash)
        .bind(hash)
        .bind(expires_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 1 {
            return Ok(CompareAndSwapOutcome::Updated);
        }

        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(if exists {
            CompareAndSwapOutcome::RefreshMismatch
        } else {
            CompareAndSwapOutcome::Missing
        })
    }
}
