//! Registration and payment records as stored.

use serde::Serialize;

use super::profile::ParticipantProfile;
use super::status::PaymentStatus;
use crate::domain::foundation::{PaymentId, RegistrationId, Timestamp};

/// A participant's registration, keyed naturally by email.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub id: RegistrationId,
    #[serde(flatten)]
    pub profile: ParticipantProfile,
    pub email_verified: bool,
    pub payment_status: PaymentStatus,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Registration {
    pub fn email(&self) -> &str {
        &self.profile.email
    }

    pub fn full_name(&self) -> &str {
        &self.profile.full_name
    }

    /// True once any payment for this registration has been confirmed.
    pub fn is_paid(&self) -> bool {
        self.payment_status.is_success()
    }
}

/// One payment attempt, keyed by the provider's order id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub registration_id: RegistrationId,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    /// Minor units (paise for INR).
    pub amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
