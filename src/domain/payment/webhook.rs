//! Razorpay webhook model.
//!
//! A delivery starts as [`UnverifiedWebhook`]. Only [`UnverifiedWebhook::verify`]
//! produces a [`VerifiedWebhook`], and only a verified webhook exposes its
//! body for parsing. The signature is checked over the bytes exactly as
//! received.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use thiserror::Error;

use super::signature::SignatureVerifier;
use crate::domain::registration::validators::normalize_email;
use crate::domain::registration::{PaymentConfirmation, PaymentFailure, RegistrationError};

/// Header carrying the webhook body signature.
pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

/// A webhook delivery whose origin has not been established.
#[derive(Debug, Clone)]
pub struct UnverifiedWebhook {
    body: Vec<u8>,
    signature: Option<String>,
}

impl UnverifiedWebhook {
    pub fn new(body: impl Into<Vec<u8>>, signature: Option<String>) -> Self {
        Self {
            body: body.into(),
            signature,
        }
    }

    /// Checks the signature over the raw body.
    ///
    /// # Errors
    ///
    /// `InvalidWebhookSignature` when the header is missing or does not match.
    pub fn verify(self, verifier: &SignatureVerifier) -> Result<VerifiedWebhook, RegistrationError> {
        let signature = self
            .signature
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(RegistrationError::InvalidWebhookSignature)?;

        if !verifier.verify_webhook(&self.body, signature) {
            return Err(RegistrationError::InvalidWebhookSignature);
        }

        Ok(VerifiedWebhook { body: self.body })
    }
}

/// A webhook delivery proven to come from the provider.
#[derive(Debug, Clone)]
pub struct VerifiedWebhook {
    body: Vec<u8>,
}

impl VerifiedWebhook {
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Parses the verified body into a typed event.
    pub fn parse(&self) -> Result<RazorpayEvent, WebhookParseError> {
        let envelope: WebhookEnvelope = serde_json::from_slice(&self.body)
            .map_err(|e| WebhookParseError::Json(e.to_string()))?;
        RazorpayEvent::try_from(envelope)
    }
}

/// Why a verified body could not be turned into an event.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebhookParseError {
    #[error("Invalid webhook JSON: {0}")]
    Json(String),

    #[error("Event {event} is missing its {entity} entity")]
    MissingEntity { event: String, entity: &'static str },
}

// ════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════

/// Top-level webhook body.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEnvelope {
    pub event: String,
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<i64>,
    #[serde(default)]
    pub payload: WebhookPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub payment: Option<EntityWrapper<PaymentEntity>>,
    #[serde(default)]
    pub order: Option<EntityWrapper<OrderEntity>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EntityWrapper<T> {
    pub entity: T,
}

/// The `payment` entity of a webhook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentEntity {
    pub id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "notes_map")]
    pub notes: Map<String, Value>,
    #[serde(default)]
    pub error_code: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl PaymentEntity {
    /// Participant email from the payment, falling back to the notes.
    pub fn email_hint(&self) -> Option<String> {
        self.email
            .as_deref()
            .or_else(|| self.notes.get("email").and_then(Value::as_str))
            .map(normalize_email)
            .filter(|e| !e.is_empty())
    }

    /// The captured payment as a reconciliation input.
    ///
    /// `None` when the payment is not tied to an order.
    pub fn confirmation(&self) -> Option<PaymentConfirmation> {
        let order_id = self.order_id.clone().filter(|o| !o.is_empty())?;
        Some(PaymentConfirmation {
            order_id,
            payment_id: self.id.clone(),
            signature: None,
            amount: self.amount,
            currency: self.currency.clone(),
            method: self.method.clone(),
        })
    }

    /// The failed payment as a failure-recording input.
    pub fn failure(&self) -> Option<PaymentFailure> {
        let order_id = self.order_id.clone().filter(|o| !o.is_empty())?;
        Some(PaymentFailure {
            order_id,
            payment_id: Some(self.id.clone()),
            email: self.email_hint(),
            amount: self.amount,
            currency: self.currency.clone(),
            method: self.method.clone(),
        })
    }
}

/// The `order` entity of a webhook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderEntity {
    pub id: String,
    #[serde(default)]
    pub amount: i64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "notes_map")]
    pub notes: Map<String, Value>,
}

/// Razorpay sends `"notes": []` when no notes were attached.
fn notes_map<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

// ════════════════════════════════════════════════════════════════════
// Events
// ════════════════════════════════════════════════════════════════════

/// Webhook events the workflow distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum RazorpayEvent {
    PaymentCaptured(PaymentEntity),
    PaymentFailed(PaymentEntity),
    PaymentAuthorized(PaymentEntity),
    OrderPaid {
        order: OrderEntity,
        payment: Option<PaymentEntity>,
    },
    /// Any other event type; acknowledged and ignored.
    Other(String),
}

impl RazorpayEvent {
    pub fn event_type(&self) -> &str {
        match self {
            RazorpayEvent::PaymentCaptured(_) => "payment.captured",
            RazorpayEvent::PaymentFailed(_) => "payment.failed",
            RazorpayEvent::PaymentAuthorized(_) => "payment.authorized",
            RazorpayEvent::OrderPaid { .. } => "order.paid",
            RazorpayEvent::Other(name) => name,
        }
    }
}

impl TryFrom<WebhookEnvelope> for RazorpayEvent {
    type Error = WebhookParseError;

    fn try_from(envelope: WebhookEnvelope) -> Result<Self, Self::Error> {
        let WebhookEnvelope { event, payload, .. } = envelope;
        let payment = payload.payment.map(|w| w.entity);

        let require_payment = |payment: Option<PaymentEntity>, event: &str| {
            payment.ok_or_else(|| WebhookParseError::MissingEntity {
                event: event.to_string(),
                entity: "payment",
            })
        };

        match event.as_str() {
            "payment.captured" => Ok(RazorpayEvent::PaymentCaptured(require_payment(
                payment, &event,
            )?)),
            "payment.failed" => Ok(RazorpayEvent::PaymentFailed(require_payment(
                payment, &event,
            )?)),
            "payment.authorized" => Ok(RazorpayEvent::PaymentAuthorized(require_payment(
                payment, &event,
            )?)),
            "order.paid" => {
                let order = payload
                    .order
                    .map(|w| w.entity)
                    .ok_or_else(|| WebhookParseError::MissingEntity {
                        event: event.clone(),
                        entity: "order",
                    })?;
                Ok(RazorpayEvent::OrderPaid { order, payment })
            }
            _ => Ok(RazorpayEvent::Other(event)),
        }
    }
}
