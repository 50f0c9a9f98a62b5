//! Storage contracts.

use async_trait::async_trait;
use scpl_core::pagination::{ListQuery, Page};
use scpl_models::{
    NewPlaylist, NewScreen, NewUser, Playlist, PlaylistSummary, RefreshSession, Screen, User,
};
use uuid::Uuid;

use crate::error::StoreError;

/// Result of a refresh-session compare-and-swap attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareAndSwapOutcome {
    /// The stored hash matched the expected value and the slot was replaced.
    Updated,
    /// The user exists but the stored hash differs or the slot is empty.
    RefreshMismatch,
    /// No user has the given id.
    Missing,
}

/// Credential store.
///
/// A user holds at most one refresh session. Writes that depend on a
/// previously read session go through [`UserStore::compare_and_swap_refresh`]
/// so concurrent rotations of the same token cannot both land.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Looks a user up by email. Callers pass a normalized email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// # Errors
    ///
    /// [`StoreError::Conflict`] when the email is already taken.
    async fn create(&self, user: NewUser) -> Result<User, StoreError>;

    /// Overwrites (`Some`) or clears (`None`) the refresh session
    /// unconditionally. Returns `false` when the user does not exist.
    async fn set_refresh_session(
        &self,
        id: Uuid,
        session: Option<RefreshSession>,
    ) -> Result<bool, StoreError>;

    /// Replaces the refresh session only if the stored hash still equals
    /// `expected_hash`.
    async fn compare_and_swap_refresh(
        &self,
        id: Uuid,
        expected_hash: &str,
        replacement: Option<RefreshSession>,
    ) -> Result<CompareAndSwapOutcome, StoreError>;
}

#[async_trait]
pub trait ScreenStore: Send + Sync {
    /// Filters by case-insensitive regex on the name, sorted by name
    /// case-insensitively.
    async fn list(&self, query: &ListQuery) -> Result<Page<Screen>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Screen>, StoreError>;

    /// Flips `is_active` atomically. `None` when the screen does not exist.
    async fn toggle_active(&self, id: Uuid) -> Result<Option<Screen>, StoreError>;

    async fn insert(&self, screen: NewScreen) -> Result<Screen, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}

#[async_trait]
pub trait PlaylistStore: Send + Sync {
    async fn list(&self, query: &ListQuery) -> Result<Page<PlaylistSummary>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Playlist>, StoreError>;

    async fn create(&self, playlist: NewPlaylist) -> Result<Playlist, StoreError>;

    async fn count(&self) -> Result<i64, StoreError>;
}
