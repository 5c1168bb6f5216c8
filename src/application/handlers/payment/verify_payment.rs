//! VerifyPaymentHandler - the reconciliation engine for client-submitted
//! payment confirmations.
//!
//! # Ordering
//!
//! 1. Signature check (fails closed, nothing is read or written before it)
//! 2. Profile validation
//! 3. One atomic unit of work: upsert registration by email, upsert payment
//!    by order id, both finalized as `success`
//! 4. Detached confirmation email
//!
//! Steps 1-3 are idempotent for identical input. Step 4 runs on every
//! successful call; recipients may see more than one confirmation.

use std::sync::Arc;

use crate::domain::foundation::RegistrationId;
use crate::domain::payment::SignatureVerifier;
use crate::domain::registration::{ParticipantProfile, PaymentConfirmation, RegistrationError};
use crate::ports::RegistrationStore;

use super::notify::ConfirmationNotifier;

/// Command carrying the checkout callback and the participant's details.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
    pub profile: ParticipantProfile,
    /// Minor units as reported by the client; informational only.
    pub amount: i64,
    pub currency: String,
}

/// Result of a verified and recorded payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyPaymentResult {
    pub order_id: String,
    pub payment_id: String,
    pub registration_id: RegistrationId,
    pub registration_created: bool,
}

pub struct VerifyPaymentHandler {
    verifier: SignatureVerifier,
    registrations: Arc<dyn RegistrationStore>,
    notifier: ConfirmationNotifier,
}

impl VerifyPaymentHandler {
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

    pub async fn handle(
        &self,
        cmd: VerifyPaymentCommand,
    ) -> Result<VerifyPaymentResult, RegistrationError> {
        let order_id = required("razorpay_order_id", &cmd.order_id)?;
        let payment_id = required("razorpay_payment_id", &cmd.payment_id)?;
        let signature = required("razorpay_signature", &cmd.signature)?;

        if !self.verifier.verify_payment(&order_id, &payment_id, &signature) {
            tracing::warn!(
                order_id = %order_id,
                payment_id = %payment_id,
                "Payment signature verification failed"
            );
            return Err(RegistrationError::InvalidSignature);
        }

        cmd.profile.validate()?;

        let confirmation = PaymentConfirmation {
            order_id: order_id.clone(),
            payment_id: payment_id.clone(),
            signature: Some(signature),
            amount: cmd.amount.max(0),
            currency: cmd.currency,
            method: None,
        };

        let reconciled = self
            .registrations
            .record_successful_payment(&cmd.profile, &confirmation)
            .await
            .map_err(|e| {
                tracing::error!(
                    order_id = %order_id,
                    payment_id = %payment_id,
                    email = %cmd.profile.email,
                    error = %e,
                    "Failed to record verified payment"
                );
                RegistrationError::from(e)
            })?;

        let registration = &reconciled.registration;
        tracing::info!(
            order_id = %order_id,
            payment_id = %payment_id,
            registration_id = %registration.id,
            email = %registration.email(),
            registration_created = reconciled.registration_created,
            payment_created = reconciled.payment_created,
            "Payment verified and recorded"
        );

        self.notifier.dispatch(
            registration.email().to_string(),
            registration.full_name().to_string(),
            order_id.clone(),
            payment_id.clone(),
        );

        Ok(VerifyPaymentResult {
            order_id,
            payment_id,
            registration_id: registration.id,
            registration_created: reconciled.registration_created,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, RegistrationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(RegistrationError::validation(
            field,
            format!("{} is required", field),
        ));
    }
    Ok(value.to_string())
}
