//! Roles and the role hierarchy.
//!
//! Roles are ranked `ADMIN > EDITOR > VIEWER`. A user satisfies a required
//! role when any of their roles ranks at or above it, so an admin passes
//! every editor check without holding `EDITOR` explicitly.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Editor,
    Viewer,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Editor, Role::Viewer];

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Editor => "EDITOR",
            Role::Viewer => "VIEWER",
        }
    }

    const fn rank(self) -> u8 {
        match self {
            Role::Admin => 2,
            Role::Editor => 1,
            Role::Viewer => 0,
        }
    }

    /// Whether holding `self` grants access guarded by `required`.
    pub const fn satisfies(self, required: Role) -> bool {
        self.rank() >= required.rank()
    }
}

/// Whether any of `roles` satisfies `required`. An empty role set satisfies nothing.
pub fn roles_satisfy(roles: &[Role], required: Role) -> bool {
    roles.iter().any(|role| role.satisfies(required))
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_satisfies_everything() {
        assert!(Role::Admin.satisfies(Role::Admin));
        assert!(Role::Admin.satisfies(Role::Editor));
        assert!(Role::Admin.satisfies(Role::Viewer));
    }

    #[test]
    fn test_editor_does_not_satisfy_admin() {
        assert!(Role::Editor.satisfies(Role::Editor));
        assert!(!Role::Editor.satisfies(Role::Admin));
    }

    #[test]
    fn test_viewer_only_satisfies_viewer() {
        assert!(!Role::Viewer.satisfies(Role::Editor));
        assert!(!Role::Viewer.satisfies(Role::Admin));
        assert!(Role::Viewer.satisfies(Role::Viewer));
    }

    #[test]
    fn test_roles_satisfy_any() {
        assert!(roles_satisfy(&[Role::Viewer, Role::Editor], Role::Editor));
        assert!(!roles_satisfy(&[], Role::Viewer));
    }

    #[test]
    fn test_serde_uses_uppercase() {
        assert_eq!(serde_json::to_string(&Role::Editor).unwrap(), "\"EDITOR\"");
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("editor".parse::<Role>().unwrap(), Role::Editor);
        assert_eq!(
            "OWNER".parse::<Role>().unwrap_err(),
            UnknownRole("OWNER".into())
        );
    }
}
