//! Playlist models.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

pub const MAX_PLAYLIST_ITEMS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlaylistItem {
    #[schema(example = "https://example.com/media/welcome.mp4")]
    pub url: String,
}

/// A playlist with its ordered items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<PlaylistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List entry and create response: `{_id, name, itemCount}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub item_count: i64,
}

impl From<&Playlist> for PlaylistSummary {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name.clone(),
            item_count: playlist.items.len() as i64,
        }
    }
}

/// Single playlist response: `{_id, name, items: [{url}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PlaylistDetail {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub items: Vec<PlaylistItem>,
}

impl From<Playlist> for PlaylistDetail {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name,
            items: playlist.items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlaylistRequest {
    #[validate(custom(function = "validate_not_blank"))]
    #[schema(example = "Morning Loop")]
    pub name: String,
    #[serde(default)]
    #[validate(
        length(max = 10, message = "A playlist holds at most 10 items"),
        custom(function = "validate_item_urls")
    )]
    pub item_urls: Vec<String>,
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::from("Name is required")));
    }
    Ok(())
}

fn validate_item_urls(urls: &[String]) -> Result<(), ValidationError> {
    if urls.iter().all(|u| url::Url::parse(u).is_ok()) {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message(Cow::from("Each item must be a valid URL")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlaylist {
    pub name: String,
    pub item_urls: Vec<String>,
}

impl From<CreatePlaylistRequest> for NewPlaylist {
    fn from(request: CreatePlaylistRequest) -> Self {
        Self::new(request.name, request.item_urls)
    }
}

impl NewPlaylist {
    pub fn new(name: impl AsRef<str>, item_urls: Vec<String>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            item_urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, urls: &[&str]) -> CreatePlaylistRequest {
        CreatePlaylistRequest {
            name: name.into(),
            item_urls: urls.iter().map(|u| u.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("Loop", &["https://example.com/a.png"]).validate().is_ok());
        assert!(request("Empty", &[]).validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let errors = request("   ", &[]).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_too_many_items_rejected() {
        let urls: Vec<String> = (0..=MAX_PLAYLIST_ITEMS)
            .map(|i| format!("https://example.com/{i}.png"))
            .collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let errors = request("Loop", &refs).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("item_urls"));
    }

    #[test]
    fn test_invalid_url_rejected() {
        let errors = request("Loop", &["https://ok.example/a.png", "not a url"])
            .validate()
            .unwrap_err();
        assert!(errors.field_errors().contains_key("item_urls"));
    }

    #[test]
    fn test_item_urls_default_to_empty() {
        let request: CreatePlaylistRequest = serde_json::from_str(r#"{"name":"Loop"}"#).unwrap();
        assert!(request.item_urls.is_empty());
    }

    #[test]
    fn test_summary_counts_items() {
        let now = Utc::now();
        let playlist = Playlist {
            id: Uuid::new_v4(),
            name: "Welcome Loop".into(),
            items: vec![
                PlaylistItem {
                    url: "https://example.com/media/welcome.mp4".into(),
                },
                PlaylistItem {
                    url: "https://example.com/media/hours.png".into(),
                },
            ],
            created_at: now,
            updated_at: now,
        };
        let summary = serde_json::to_value(PlaylistSummary::from(&playlist)).unwrap();
        assert_eq!(summary["itemCount"], 2);
        assert_eq!(summary["_id"], playlist.id.to_string());
    }
}
