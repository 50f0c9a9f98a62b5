//! Role-based authorization.
//!
//! Roles are ranked `ADMIN > EDITOR > VIEWER`; see [`scpl_core::roles`].
//! Handlers gate on a minimum role either with the [`RequireEditor`] /
//! [`RequireAdmin`] extractors or by calling [`check_role`] directly.

use scpl_core::AppError;
use scpl_core::roles::{Role, roles_satisfy};

use crate::middleware::auth::AuthUser;

/// Checks that one of the user's roles ranks at or above `required`.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn handler(auth_user: AuthUser) -> Result<Json<Response>, AppError> {
///     check_role(&auth_user, Role::Editor)?;
///     // Handler logic
/// }
/// ```
pub fn check_role(auth_user: &AuthUser, required: Role) -> Result<(), AppError> {
    if roles_satisfy(auth_user.roles(), required) {
        Ok(())
    } else {
        Err(AppError::forbidden("Forbidden"))
    }
}

/// Declares an extractor that authenticates the caller (401 on failure) and
/// then requires a minimum role (403 on failure).
macro_rules! require_role {
    ($name:ident, $role:expr) => {
        #[derive(Debug, Clone)]
        pub struct $name(pub $crate::middleware::auth::AuthUser);

        impl axum::extract::FromRequestParts<$crate::state::AppState> for $name {
            type Rejection = scpl_core::AppError;

            async fn from_request_parts(
                parts: &mut axum::http::request::Parts,
                state: &$crate::state::AppState,
            ) -> Result<Self, Self::Rejection> {
                let auth_user = <$crate::middleware::auth::AuthUser as axum::extract::FromRequestParts<
                    $crate::state::AppState,
                >>::from_request_parts(parts, state)
                .await?;

                $crate::middleware::role::check_role(&auth_user, $role)?;

                Ok($name(auth_user))
            }
        }
    };
}

require_role!(RequireEditor, Role::Editor);
require_role!(RequireAdmin, Role::Admin);
