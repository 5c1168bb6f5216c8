//! HandleWebhookHandler - Processes Razorpay webhook deliveries.
//!
//! The body signature is checked before anything is parsed. Once it passes,
//! every delivery is acknowledged; processing failures are logged and left
//! to client verification or a later delivery to repair.

use std::sync::Arc;

use crate::domain::foundation::RegistrationId;
use crate::domain::payment::{PaymentEntity, RazorpayEvent, SignatureVerifier, UnverifiedWebhook};
use crate::domain::registration::{FailureOutcome, ParticipantProfile, RegistrationError};
use crate::ports::RegistrationStore;

use super::notify::ConfirmationNotifier;

/// What a delivery resulted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Captured payment recorded as `success`.
    Reconciled {
        order_id: String,
        registration_id: RegistrationId,
        notified: bool,
    },
    /// Captured payment with no local registration to attach it to yet.
    Deferred { order_id: String },
    /// Failed payment recorded.
    FailureRecorded { registration_id: RegistrationId },
    /// Failed payment arrived after the order had already succeeded.
    FailureIgnored { registration_id: RegistrationId },
    /// Failed payment for an order this system never saw.
    FailureUntracked { order_id: String },
    /// Event logged only.
    Acknowledged { event: String },
    /// Verified body that was not a usable event.
    Unparsable,
    /// The store rejected the write; logged and acknowledged anyway.
    ProcessingFailed { order_id: String },
}

pub struct HandleWebhookHandler {
    verifier: SignatureVerifier,
    registrations: Arc<dyn RegistrationStore>,
    notifier: ConfirmationNotifier,
}

impl HandleWebhookHandler {
    pub fn new(
        verifier: SignatureVerifier,
        registrations: Arc<dyn RegistrationStore>,
        notifier: ConfirmationNotifier,
    ) -> Self {
        Self {
            verifier,
            registrations,
            notifier,
        }
    }

    /// # Errors
    ///
    /// `InvalidWebhookSignature` if the signature is missing or wrong. Nothing
    /// after verification is reported as an error.
    pub async fn handle(
        &self,
        webhook: UnverifiedWebhook,
    ) -> Result<WebhookOutcome, RegistrationError> {
        let verified = webhook.verify(&self.verifier).map_err(|e| {
            tracing::warn!("Webhook signature verification failed");
            e
        })?;

        let event = match verified.parse() {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unparsable webhook body");
                return Ok(WebhookOutcome::Unparsable);
            }
        };

        tracing::info!(event = %event.event_type(), "Webhook received");

        match event {
            RazorpayEvent::PaymentCaptured(payment) => Ok(self.on_captured(payment).await),
            RazorpayEvent::PaymentFailed(payment) => Ok(self.on_failed(payment).await),
            RazorpayEvent::PaymentAuthorized(payment) => {
                tracing::info!(
                    payment_id = %payment.id,
                    order_id = payment.order_id.as_deref().unwrap_or_default(),
                    "Payment authorized"
                );
                Ok(WebhookOutcome::Acknowledged {
                    event: "payment.authorized".to_string(),
                })
            }
            RazorpayEvent::OrderPaid { order, payment } => {
                tracing::info!(
                    order_id = %order.id,
                    payment_id = payment.as_ref().map(|p| p.id.as_str()).unwrap_or_default(),
                    "Order paid"
                );
                Ok(WebhookOutcome::Acknowledged {
                    event: "order.paid".to_string(),
                })
            }
            RazorpayEvent::Other(name) => {
                tracing::info!(event = %name, "Unhandled webhook event");
                Ok(WebhookOutcome::Acknowledged { event: name })
            }
        }
    }

    async fn on_captured(&self, payment: PaymentEntity) -> WebhookOutcome {
        let Some(confirmation) = payment.confirmation() else {
            tracing::warn!(payment_id = %payment.id, "Captured payment has no order id");
            return WebhookOutcome::Acknowledged {
                event: "payment.captured".to_string(),
            };
        };

        let profile =
            ParticipantProfile::from_order_notes(&payment.notes, payment.contact.as_deref());

        let reconciled = match profile {
            Some(profile) => self
                .registrations
                .record_successful_payment(&profile, &confirmation)
                .await
                .map(Some),
            None => {
                self.registrations
                    .record_captured_payment(payment.email_hint().as_deref(), &confirmation)
                    .await
            }
        };

        let reconciled = match reconciled {
            Ok(reconciled) => reconciled,
            Err(e) => {
                tracing::error!(
                    order_id = %confirmation.order_id,
                    payment_id = %confirmation.payment_id,
                    error = %e,
                    "Failed to record captured payment"
                );
                return WebhookOutcome::ProcessingFailed {
                    order_id: confirmation.order_id,
                };
            }
        };

        let Some(reconciled) = reconciled else {
            tracing::warn!(
                order_id = %confirmation.order_id,
                payment_id = %confirmation.payment_id,
                "Captured payment has no matching registration; awaiting client verification"
            );
            return WebhookOutcome::Deferred {
                order_id: confirmation.order_id,
            };
        };

        let registration = &reconciled.registration;
        tracing::info!(
            order_id = %confirmation.order_id,
            payment_id = %confirmation.payment_id,
            registration_id = %registration.id,
            payment_created = reconciled.payment_created,
            "Captured payment reconciled"
        );

        // Client verification already sent a confirmation for known orders.
        let notified = reconciled.payment_created;
        if notified {
            self.notifier.dispatch(
                registration.email().to_string(),
                registration.full_name().to_string(),
                confirmation.order_id.clone(),
                confirmation.payment_id.clone(),
            );
        }

        WebhookOutcome::Reconciled {
            order_id: confirmation.order_id,
            registration_id: registration.id,
            notified,
        }
    }

    async fn on_failed(&self, payment: PaymentEntity) -> WebhookOutcome {
        let Some(failure) = payment.failure() else {
            tracing::warn!(payment_id = %payment.id, "Failed payment has no order id");
            return WebhookOutcome::Acknowledged {
                event: "payment.failed".to_string(),
            };
        };

        tracing::info!(
            order_id = %failure.order_id,
            payment_id = %payment.id,
            error_code = payment.error_code.as_deref().unwrap_or_default(),
            error_description = payment.error_description.as_deref().unwrap_or_default(),
            "Payment failed"
        );

        let outcome = match self.registrations.record_payment_failure(&failure).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!(
                    order_id = %failure.order_id,
                    error = %e,
                    "Failed to record payment failure"
                );
                return WebhookOutcome::ProcessingFailed {
                    order_id: failure.order_id,
                };
            }
        };

        match outcome {
            FailureOutcome::Recorded { registration_id } => {
                WebhookOutcome::FailureRecorded { registration_id }
            }
            FailureOutcome::AlreadySucceeded { registration_id } => {
                tracing::warn!(
                    order_id = %failure.order_id,
                    registration_id = %registration_id,
                    "Ignoring failure for an order that already succeeded"
                );
                WebhookOutcome::FailureIgnored { registration_id }
            }
            FailureOutcome::NotTracked => WebhookOutcome::FailureUntracked {
                order_id: failure.order_id,
            },
        }
    }
}
