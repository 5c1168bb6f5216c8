//! HTTP middleware for axum.
//!
//! - `admin_auth` - Admin capability token check

pub mod admin_auth;

pub use admin_auth::{require_admin, ADMIN_TOKEN_HEADER};
