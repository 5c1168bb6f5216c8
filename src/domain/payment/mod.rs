//! Payment domain - Razorpay signatures, orders, and webhook events.

mod order;
pub mod signature;
mod webhook;

pub use order::{Order, OrderRequest, DEFAULT_CURRENCY, DEFAULT_ORDER_AMOUNT, RECEIPT_PREFIX};
pub use signature::{SignatureConfigError, SignatureVerifier};
pub use webhook::{
    OrderEntity, PaymentEntity, RazorpayEvent, UnverifiedWebhook, VerifiedWebhook,
    WebhookEnvelope, WebhookParseError, SIGNATURE_HEADER,
};
