//! # scpl models
//!
//! Domain models and DTOs shared by the server, the seeder and the API client.
//!
//! JSON payloads follow the public wire format: camelCase keys and the record
//! id exposed as `_id`.
//!
//! # Modules
//!
//! - [`auth`]: Login request and token/message responses
//! - [`users`]: User records and refresh sessions
//! - [`screens`]: Display devices
//! - [`playlists`]: Ordered lists of media URLs

pub mod auth;
pub mod playlists;
pub mod screens;
pub mod users;

// Re-export commonly used types at crate root for convenience
pub use auth::{AccessTokenResponse, LoginRequest, MessageResponse};
pub use playlists::{
    CreatePlaylistRequest, NewPlaylist, Playlist, PlaylistDetail, PlaylistItem, PlaylistSummary,
};
pub use screens::{NewScreen, Screen, ScreenStatus};
pub use users::{NewUser, RefreshSession, User, normalize_email};
