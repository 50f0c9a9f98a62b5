//! JWT claim structure for access tokens.

use scpl_core::roles::{Role, roles_satisfy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JWT claims for access tokens.
///
/// # Fields
///
/// - `sub`: User ID (subject)
/// - `roles`: Roles held by the user when the token was issued
/// - `exp`: Token expiration timestamp
/// - `iat`: Token issued-at timestamp
/// - `jti`: Unique token id, so tokens minted in the same second differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Claims {
    /// User ID (subject claim)
    pub sub: String,
    pub roles: Vec<Role>,
    /// Token expiration timestamp (Unix timestamp)
    pub exp: usize,
    /// Token issued-at timestamp (Unix timestamp)
    pub iat: usize,
    pub jti: String,
}

impl Claims {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the embedded roles satisfy `required` under the role hierarchy.
    pub fn satisfies(&self, required: Role) -> bool {
        roles_satisfy(&self.roles, required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(roles: Vec<Role>) -> Claims {
        Claims {
            sub: "9b2f3a8e-0c1d-4e5f-8a9b-0c1d2e3f4a5b".to_string(),
            roles,
            exp: 9999999999,
            iat: 1234567890,
            jti: "test-jti".to_string(),
        }
    }

    #[test]
    fn test_claims_serialization() {
        let json = serde_json::to_value(claims(vec![Role::Admin, Role::Editor])).unwrap();
        assert_eq!(json["roles"], serde_json::json!(["ADMIN", "EDITOR"]));
        assert_eq!(json["exp"], 9999999999u64);
    }

    #[test]
    fn test_claims_deserialization() {
        let json = r#"{
            "sub": "user-1",
            "roles": ["VIEWER"],
            "exp": 1700000000,
            "iat": 1699999000,
            "jti": "abc"
        }"#;
        let claims: Claims = serde_json::from_str(json).unwrap();
        assert_eq!(claims.roles, vec![Role::Viewer]);
        assert_eq!(claims.exp - claims.iat, 1000);
    }

    #[test]
    fn test_satisfies_uses_hierarchy() {
        let admin = claims(vec![Role::Admin]);
        assert!(admin.satisfies(Role::Editor));
        assert!(!admin.has_role(Role::Editor));

        let viewer = claims(vec![Role::Viewer]);
        assert!(!viewer.satisfies(Role::Editor));
        assert!(!viewer.satisfies(Role::Admin));
    }
}
