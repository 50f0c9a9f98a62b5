//! Pagination and search for list endpoints.
//!
//! List endpoints accept `search`, `page` and `limit` query parameters:
//!
//! - `search`: case-insensitive regular expression matched against the name
//! - `page`: 1-indexed page number (default: 1)
//! - `limit`: items per page (1-100, default: 10)
//!
//! Out-of-range values are rejected by validation rather than clamped.
//!
//! # Example
//!
//! ```ignore
//! // GET /screens?search=lobby&page=2&limit=5
//! let query = ListQuery {
//!     search: Some("lobby".into()),
//!     page: Some(2),
//!     limit: Some(5),
//! };
//!
//! assert_eq!(query.offset(), 5);
//! ```

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;
pub const MAX_PAGE: i64 = 1_000_000;

/// Deserializes an optional string into an optional i64.
///
/// Query parameters may arrive as empty strings, which are treated as `None`.
fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Query parameters accepted by list endpoints.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema, IntoParams,
)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Case-insensitive regular expression matched against the name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Page number (1-indexed, default: 1)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(
        min = 1,
        max = MAX_PAGE,
        message = "page must be between 1 and 1000000"
    ))]
    pub page: Option<i64>,
    /// Items per page (1-100, default: 10)
    #[serde(
        default,
        deserialize_with = "deserialize_optional_i64",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
}

impl ListQuery {
    #[must_use]
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }

    /// The search pattern, if one was given. A blank string means no filter.
    #[must_use]
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Compiles the search pattern case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns the regex error when the pattern is not a valid expression.
    pub fn search_regex(&self) -> Result<Option<Regex>, regex::Error> {
        self.search()
            .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build())
            .transpose()
    }
}

/// Paginated list response: `{items, total, page, limit}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of matching items across all pages
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, query: &ListQuery) -> Self {
        Self {
            items,
            total,
            page: query.page(),
            limit: query.limit(),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
        assert_eq!(query.offset(), 0);
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_offset_from_page() {
        let query = ListQuery {
            search: None,
            page: Some(3),
            limit: Some(20),
        };
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_page_zero_rejected() {
        let query = ListQuery {
            page: Some(0),
            ..Default::default()
        };
        let errors = query.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page"));
    }

    #[test]
    fn test_huge_page_rejected() {
        let query = ListQuery {
            page: Some(i64::MAX),
            limit: Some(100),
            ..Default::default()
        };
        let errors = query.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page"));
        assert_eq!(query.offset(), i64::MAX);
    }

    #[test]
    fn test_max_page_accepted() {
        let query = ListQuery {
            page: Some(MAX_PAGE),
            limit: Some(MAX_LIMIT),
            ..Default::default()
        };
        assert!(query.validate().is_ok());
        assert_eq!(query.offset(), (MAX_PAGE - 1) * MAX_LIMIT);
    }

    #[test]
    fn test_limit_bounds() {
        for (limit, ok) in [(0, false), (1, true), (100, true), (101, false)] {
            let query = ListQuery {
                limit: Some(limit),
                ..Default::default()
            };
            assert_eq!(query.validate().is_ok(), ok, "limit {limit}");
        }
    }

    #[test]
    fn test_deserialize_empty_strings() {
        let json = r#"{"page":"","limit":""}"#;
        let query: ListQuery = serde_json::from_str(json).unwrap();
        assert_eq!(query.page(), 1);
        assert_eq!(query.limit(), 10);
    }

    #[test]
    fn test_deserialize_non_numeric_fails() {
        let json = r#"{"page":"two"}"#;
        assert!(serde_json::from_str::<ListQuery>(json).is_err());
    }

    #[test]
    fn test_empty_search_means_no_filter() {
        let query = ListQuery {
            search: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(query.search(), None);
        assert!(query.search_regex().unwrap().is_none());
    }

    #[test]
    fn test_search_regex_is_case_insensitive() {
        let query = ListQuery {
            search: Some("^main".into()),
            ..Default::default()
        };
        let regex = query.search_regex().unwrap().unwrap();
        assert!(regex.is_match("Main Lobby"));
        assert!(!regex.is_match("The Main Lobby"));
    }

    #[test]
    fn test_invalid_search_regex() {
        let query = ListQuery {
            search: Some("(unclosed".into()),
            ..Default::default()
        };
        assert!(query.search_regex().is_err());
    }

    #[test]
    fn test_page_serialize_shape() {
        let page = Page::new(vec!["a", "b"], 12, &ListQuery::default());
        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "items": ["a", "b"], "total": 12, "page": 1, "limit": 10 })
        );
    }
}
