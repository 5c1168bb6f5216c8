//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod admin;
pub mod otp;
pub mod payment;

#[cfg(test)]
pub(crate) mod test_support;

pub use admin::{
    AdminLoginHandler, FailedRecipient, ListRegistrationsHandler, SendWebinarLinksCommand,
    SendWebinarLinksHandler, SendWebinarLinksResult, WebinarSettingsHandler,
};
pub use otp::{SendOtpHandler, VerifyOtpHandler};
pub use payment::{
    ConfirmationNotifier, CreateOrderCommand, CreateOrderHandler, HandleWebhookHandler,
    VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult, WebhookOutcome,
};
