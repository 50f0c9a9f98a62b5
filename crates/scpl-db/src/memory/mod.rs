//! Thread-safe in-memory store implementations for local development and tests.
//!
//! Behaviour mirrors the PostgreSQL stores: case-insensitive regex search,
//! ordering by lowercased name then id, and atomic compare-and-swap of the
//! refresh session under a single write lock.

mod playlists;
mod screens;
mod users;

pub use playlists::MemoryPlaylistStore;
pub use screens::MemoryScreenStore;
pub use users::MemoryUserStore;

use scpl_core::pagination::{ListQuery, Page};
use uuid::Uuid;

use crate::error::StoreError;

/// Filters, sorts and pages `records` the way the SQL list queries do.
pub(crate) fn paginate<T, U>(
    records: impl Iterator<Item = T>,
    query: &ListQuery,
    key: impl Fn(&T) -> (&str, Uuid),
    project: impl FnMut(T) -> U,
) -> Result<Page<U>, StoreError> {
    let regex = query
        .search_regex()
        .map_err(|e| StoreError::InvalidPattern(e.to_string()))?;

    let mut matching: Vec<T> = records
        .filter(|r| regex.as_ref().is_none_or(|re| re.is_match(key(r).0)))
        .collect();
    matching.sort_by_cached_key(|r| {
        let (name, id) = key(r);
        (name.to_lowercase(), id)
    });

    let total = matching.len() as i64;
    let items = matching
        .into_iter()
        .skip(usize::try_from(query.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(query.limit()).unwrap_or(0))
        .map(project)
        .collect();

    Ok(Page::new(items, total, query))
}
