//! Feature modules. Each follows the `controller.rs` (HTTP handlers),
//! `service.rs` (business logic) and `router.rs` (route table) layout.

pub mod auth;
pub mod health;
pub mod playlists;
pub mod screens;

use anyhow::anyhow;
use scpl_core::AppError;
use scpl_core::pagination::ListQuery;
use scpl_db::StoreError;
use uuid::Uuid;

use crate::validator::INVALID_QUERY;

/// Parses a path id. Anything that is not a UUID is a 400 `Invalid id`.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::bad_request(anyhow!("Invalid id")))
}

pub(crate) fn not_found() -> AppError {
    AppError::not_found(anyhow!("Not found"))
}

/// Rejects a search pattern that does not compile before it reaches a store.
pub(crate) fn ensure_valid_search(query: &ListQuery) -> Result<(), AppError> {
    query.search_regex().map(|_| ()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected search pattern");
        AppError::bad_request(anyhow!(INVALID_QUERY))
    })
}

/// Maps store failures to responses. A search pattern the database refuses
/// is the client's fault; everything else is a 500.
pub(crate) fn store_error(err: StoreError) -> AppError {
    match err {
        StoreError::InvalidPattern(_) => AppError::bad_request(anyhow!(INVALID_QUERY)),
        other => AppError::internal(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);

        let err = parse_id("42").unwrap_err();
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.message(), "Invalid id");
    }

    #[test]
    fn test_blank_search_is_accepted() {
        let query = ListQuery {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert!(ensure_valid_search(&query).is_ok());

        let query = ListQuery {
            search: Some("[a-".into()),
            ..Default::default()
        };
        assert_eq!(ensure_valid_search(&query).unwrap_err().message(), "Invalid query");
    }

    #[test]
    fn test_store_error_mapping() {
        let err = store_error(StoreError::InvalidPattern("unbalanced".into()));
        assert_eq!(err.status.as_u16(), 400);
        assert_eq!(err.message(), "Invalid query");

        let err = store_error(StoreError::Corrupt("roles".into()));
        assert_eq!(err.status.as_u16(), 500);
        assert_eq!(err.message(), "Internal server error");
    }
}
