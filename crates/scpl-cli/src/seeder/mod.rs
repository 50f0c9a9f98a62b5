//! Idempotent database seeding.
//!
//! Every seeder checks for existing data first, so running them on each
//! server start is safe.

mod playlists;
mod screens;
mod users;

pub use playlists::{DEMO_PLAYLISTS, seed_playlists};
pub use screens::{DEMO_SCREENS, seed_screens};
pub use users::{create_user, seed_admin};

use std::time::Instant;

use scpl_config::SeedConfig;
use scpl_db::{StoreError, Stores};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to hash password: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// What a seeding run inserted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub admin_created: bool,
    pub screens_created: usize,
    pub playlists_created: usize,
}

impl SeedSummary {
    pub fn is_empty(&self) -> bool {
        !self.admin_created && self.screens_created == 0 && self.playlists_created == 0
    }
}

/// Seeds the admin account, the demo screens and the demo playlists, in
/// that order.
pub async fn seed_all(
    stores: &Stores,
    config: &SeedConfig,
    hash_cost: u32,
) -> Result<SeedSummary, SeedError> {
    let start_time = Instant::now();

    let summary = SeedSummary {
        admin_created: seed_admin(stores, config, hash_cost).await?,
        screens_created: seed_screens(stores).await?,
        playlists_created: seed_playlists(stores).await?,
    };

    tracing::info!(
        admin_created = summary.admin_created,
        screens_created = summary.screens_created,
        playlists_created = summary.playlists_created,
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "Seeding finished"
    );

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_all_is_idempotent() {
        let stores = Stores::in_memory();
        let config = SeedConfig::default();

        let first = seed_all(&stores, &config, 4).await.unwrap();
        assert!(first.admin_created);
        assert_eq!(first.screens_created, DEMO_SCREENS.len());
        assert_eq!(first.playlists_created, DEMO_PLAYLISTS.len());

        let second = seed_all(&stores, &config, 4).await.unwrap();
        assert!(second.is_empty());

        assert_eq!(stores.screens.count().await.unwrap(), 3);
        assert_eq!(stores.playlists.count().await.unwrap(), 2);
    }
}
