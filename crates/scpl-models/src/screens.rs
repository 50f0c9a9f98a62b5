//! Screen (display device) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Main Lobby")]
    pub name: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Response of the toggle endpoint: `{_id, isActive}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScreenStatus {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub is_active: bool,
}

impl From<&Screen> for ScreenStatus {
    fn from(screen: &Screen) -> Self {
        Self {
            id: screen.id,
            is_active: screen.is_active,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScreen {
    pub name: String,
    pub is_active: bool,
}

impl NewScreen {
    pub fn new(name: impl AsRef<str>, is_active: bool) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            is_active,
        }
    }
}
