//! # scpl db
//!
//! Persistence for the signage backend.
//!
//! - [`store`]: Storage contracts (`UserStore`, `ScreenStore`, `PlaylistStore`)
//! - [`postgres`]: PostgreSQL implementations (SQLx, runtime-checked queries)
//! - [`memory`]: Thread-safe in-process implementations for tests and demos
//!
//! # Example
//!
//! ```ignore
//! use scpl_config::DatabaseConfig;
//! use scpl_db::{Stores, init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&DatabaseConfig::from_env()?).await?;
//! run_migrations(&pool).await?;
//! let stores = Stores::postgres(pool);
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

use std::fmt;
use std::sync::Arc;

use scpl_config::DatabaseConfig;
use sqlx::postgres::PgPoolOptions;

pub use error::StoreError;
pub use memory::{MemoryPlaylistStore, MemoryScreenStore, MemoryUserStore};
pub use postgres::{PgPlaylistStore, PgScreenStore, PgUserStore};
pub use store::{CompareAndSwapOutcome, PlaylistStore, ScreenStore, UserStore};

// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Opens a PostgreSQL connection pool.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    tracing::info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Handles to every store, shared through the application state.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub screens: Arc<dyn ScreenStore>,
    pub playlists: Arc<dyn PlaylistStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(PgUserStore::new(pool.clone())),
            screens: Arc::new(PgScreenStore::new(pool.clone())),
            playlists: Arc::new(PgPlaylistStore::new(pool)),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(MemoryUserStore::default()),
            screens: Arc::new(MemoryScreenStore::default()),
            playlists: Arc::new(MemoryPlaylistStore::default()),
        }
    }
}

impl fmt::Debug for Stores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stores").finish_non_exhaustive()
    }
}
