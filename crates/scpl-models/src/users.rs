//! User records.
//!
//! Users are never serialized to clients; the types here carry credential
//! material and are used by the stores and the session flow only.

use chrono::{DateTime, Utc};
use scpl_core::roles::Role;
use uuid::Uuid;

/// The single refresh slot of a user: the stored token hash and its absolute
/// expiry. Both are present or the slot is empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshSession {
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

impl RefreshSession {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub refresh_session: Option<RefreshSession>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
}

impl NewUser {
    /// Normalizes the email and trims the name. An empty role list becomes
    /// `[VIEWER]`.
    pub fn new(
        name: impl AsRef<str>,
        email: impl AsRef<str>,
        password_hash: String,
        roles: Vec<Role>,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            email: normalize_email(email.as_ref()),
            password_hash,
            roles: if roles.is_empty() {
                vec![Role::Viewer]
            } else {
                roles
            },
        }
    }
}

/// Emails are stored trimmed and lowercased so lookups are case-insensitive.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_user_normalizes() {
        let user = NewUser::new("  Ada  ", " Ada@Example.COM ", "hash".into(), vec![]);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.roles, vec![Role::Viewer]);
    }

    #[test]
    fn test_session_expiry_is_strict() {
        let now = Utc::now();
        let session = RefreshSession {
            token_hash: "h".into(),
            expires_at: now,
        };
        assert!(!session.is_expired_at(now));
        assert!(session.is_expired_at(now + Duration::seconds(1)));
    }
}
