//! Request extractors for authentication and authorization.
//!
//! # Modules
//!
//! - [`auth`]: Bearer-token authentication (`AuthUser`)
//! - [`role`]: Role hierarchy checks and role-gated extractors
//!
//! # Authentication Flow
//!
//! 1. Client sends request with `Authorization: Bearer <token>` header
//! 2. `AuthUser` verifies the JWT and exposes its claims
//! 3. `RequireEditor` / `RequireAdmin` additionally check the role hierarchy
//! 4. Handler executes if all checks pass
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::role::RequireEditor;
//!
//! async fn toggle_screen(RequireEditor(auth_user): RequireEditor) -> impl IntoResponse {
//!     // Only reached by EDITOR or ADMIN
//! }
//! ```

pub mod auth;
pub mod role;
