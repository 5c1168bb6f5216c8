//! HTTP adapter for the unauthenticated endpoints.

pub mod dto;
mod handlers;
mod routes;

pub use routes::public_routes;
