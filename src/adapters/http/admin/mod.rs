//! HTTP adapter for the admin surface.

pub mod dto;
mod handlers;
mod routes;

pub use routes::{admin_routes, auth_routes};
