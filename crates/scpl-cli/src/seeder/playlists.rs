use scpl_db::Stores;
use scpl_models::NewPlaylist;

use super::SeedError;

/// Demo playlists: `(name, media urls)`.
pub const DEMO_PLAYLISTS: [(&str, [&str; 2]); 2] = [
    (
        "Welcome Loop",
        [
            "https://example.com/media/welcome.mp4",
            "https://example.com/media/hours.png",
        ],
    ),
    (
        "Announcements",
        [
            "https://example.com/media/announcement1.jpg",
            "https://example.com/media/announcement2.jpg",
        ],
    ),
];

/// Inserts [`DEMO_PLAYLISTS`] when the playlist table is empty. Returns the
/// number of playlists inserted.
pub async fn seed_playlists(stores: &Stores) -> Result<usize, SeedError> {
    if stores.playlists.count().await? > 0 {
        tracing::debug!("Playlists already present, skipping");
        return Ok(0);
    }

    for (name, urls) in DEMO_PLAYLISTS {
        let item_urls = urls.iter().map(|u| u.to_string()).collect();
        stores
            .playlists
            .create(NewPlaylist::new(name, item_urls))
            .await?;
    }
    tracing::info!(count = DEMO_PLAYLISTS.len(), "Seeded playlists");

    Ok(DEMO_PLAYLISTS.len())
}
