//! Inputs and outcomes of the reconciliation units of work.
//!
//! A store executes each unit atomically; these types describe what goes
//! in and what was observed coming out.

use super::registration::{PaymentRecord, Registration};
use crate::domain::foundation::RegistrationId;

/// A payment the provider has confirmed as captured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    pub order_id: String,
    pub payment_id: String,
    /// Absent on the webhook path, where the body signature covers the event.
    pub signature: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub method: Option<String>,
}

/// Result of recording a successful payment.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciled {
    pub registration: Registration,
    pub payment: PaymentRecord,
    /// False when an existing row for the email was reused.
    pub registration_created: bool,
    /// False when the order id had already been recorded.
    pub payment_created: bool,
}

/// A payment the provider reported as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentFailure {
    pub order_id: String,
    pub payment_id: Option<String>,
    pub email: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub method: Option<String>,
}

/// What recording a failure did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOutcome {
    /// Payment and registration are now `failed`.
    Recorded { registration_id: RegistrationId },
    /// The order was already `success`; nothing was downgraded.
    AlreadySucceeded { registration_id: RegistrationId },
    /// Neither the order nor the email is known locally.
    NotTracked,
}
