//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `RegistrationStore` - registrations and payment attempts
//! - `OrderGateway` - payment provider order creation
//! - `Mailer` - outbound email
//! - `OtpStore` - one-time verification codes
//! - `SettingsStore` - webinar schedule
//! - `AdminTokens` - admin capability tokens

mod admin_tokens;
mod mailer;
mod order_gateway;
mod otp_store;
mod registration_store;
mod settings_store;

pub use admin_tokens::{AdminAuthError, AdminClaims, AdminTokens, IssuedToken, ADMIN_SCOPE};
pub use mailer::{ConfirmationEmail, MailError, Mailer, WebinarLinkEmail};
pub use order_gateway::{GatewayError, OrderGateway};
pub use otp_store::OtpStore;
pub use registration_store::RegistrationStore;
pub use settings_store::SettingsStore;
