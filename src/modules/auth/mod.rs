//! Session endpoints: login, refresh, logout and revoke-all.
//!
//! The access token travels in the response body; the refresh token only as
//! the `refreshToken` HTTP-only cookie scoped to `/auth`.

pub mod controller;
pub mod router;
pub mod service;
