//! HTTP adapter for the checkout flow.

pub mod dto;
mod handlers;
mod routes;

pub use routes::payment_routes;
