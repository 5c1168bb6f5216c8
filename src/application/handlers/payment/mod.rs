//! Payment handlers: order creation, client verification, webhooks.

mod create_order;
mod handle_webhook;
mod notify;
mod verify_payment;

pub use create_order::{CreateOrderCommand, CreateOrderHandler};
pub use handle_webhook::{HandleWebhookHandler, WebhookOutcome};
pub use notify::ConfirmationNotifier;
pub use verify_payment::{VerifyPaymentCommand, VerifyPaymentHandler, VerifyPaymentResult};
