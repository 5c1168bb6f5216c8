//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AdminLoginHandler, ConfirmationNotifier, CreateOrderCommand, CreateOrderHandler,
    HandleWebhookHandler, ListRegistrationsHandler, SendOtpHandler, SendWebinarLinksCommand,
    SendWebinarLinksHandler, VerifyOtpHandler, VerifyPaymentCommand, VerifyPaymentHandler,
    WebhookOutcome, WebinarSettingsHandler,
};
