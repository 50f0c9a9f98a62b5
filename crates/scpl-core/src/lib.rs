//! # scpl core
//!
//! Foundational types shared by every crate of the signage backend:
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: List query parameters and the paginated response envelope
//! - [`password`]: bcrypt password hashing and verification
//! - [`roles`]: The `ADMIN > EDITOR > VIEWER` role hierarchy
//!
//! # Example
//!
//! ```ignore
//! use scpl_core::errors::AppError;
//! use scpl_core::pagination::{ListQuery, Page};
//! use scpl_core::roles::Role;
//!
//! let error = AppError::not_found(anyhow::anyhow!("Not found"));
//! assert!(Role::Admin.satisfies(Role::Editor));
//! ```

pub mod errors;
pub mod pagination;
pub mod password;
pub mod roles;

// Re-export commonly used types at crate root
pub use errors::AppError;
pub use pagination::{ListQuery, Page};
pub use password::{hash_password, hash_password_with_cost, verify_password};
pub use roles::Role;
