use scpl_db::Stores;
use scpl_models::NewScreen;

use super::SeedError;

/// Demo screens: `(name, is_active)`.
pub const DEMO_SCREENS: [(&str, bool); 3] = [
    ("Main Lobby", true),
    ("Conference Room A", false),
    ("Reception", true),
];

/// Inserts [`DEMO_SCREENS`] when the screen table is empty. Returns the
/// number of screens inserted.
pub async fn seed_screens(stores: &Stores) -> Result<usize, SeedError> {
    if stores.screens.count().await? > 0 {
        tracing::debug!("Screens already present, skipping");
        return Ok(0);
    }

    for (name, is_active) in DEMO_SCREENS {
        stores
            .screens
            .insert(NewScreen::new(name, is_active))
            .await?;
    }
    tracing::info!(count = DEMO_SCREENS.len(), "Seeded screens");

    Ok(DEMO_SCREENS.len())
}
