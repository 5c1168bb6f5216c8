//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `postgres` - sqlx-backed stores
//! - `memory` - in-process stores for tests and local runs
//! - `razorpay` - payment provider order client
//! - `email` - SMTP and logging mailers
//! - `auth` - admin capability tokens
//! - `http` - axum routers and handlers

pub mod auth;
pub mod email;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;

pub use auth::JwtAdminTokens;
pub use email::{LogMailer, SmtpMailer};
pub use memory::{InMemoryOtpStore, InMemoryRegistrationStore, InMemorySettingsStore};
pub use postgres::{PostgresOtpStore, PostgresRegistrationStore, PostgresSettingsStore};
pub use razorpay::{RazorpayConfig, RazorpayOrderClient};
