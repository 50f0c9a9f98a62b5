//! PostgreSQL store implementations.
//!
//! Queries are checked at runtime (`query_as::<_, Row>`), so building the
//! crate does not need a live database. Search uses PostgreSQL's `~*`
//! case-insensitive regex operator and results are ordered by
//! `LOWER(name), id`.

mod playlists;
mod screens;
mod users;

pub use playlists::PgPlaylistStore;
pub use screens::PgScreenStore;
pub use users::PgUserStore;
