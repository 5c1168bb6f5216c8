//! Mailer port.
//!
//! Outbound email. Delivery is best-effort: callers decide whether a
//! failure matters (it does for OTP codes, it does not for confirmations).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::otp::OtpCode;
use crate::domain::webinar::WebinarSettings;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends the payment confirmation with the current webinar schedule.
    async fn send_confirmation(&self, email: &ConfirmationEmail) -> Result<(), MailError>;

    /// Sends a one-time verification code.
    async fn send_otp(&self, to: &str, code: &OtpCode, expiry_minutes: i64)
        -> Result<(), MailError>;

    /// Sends the joining link to a paid participant.
    async fn send_webinar_link(&self, email: &WebinarLinkEmail) -> Result<(), MailError>;
}

/// Content of a registration confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEmail {
    pub to: String,
    pub name: String,
    pub order_id: String,
    pub payment_id: String,
    pub settings: WebinarSettings,
}

/// Content of a joining-link broadcast message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebinarLinkEmail {
    pub to: String,
    pub name: String,
    pub zoom_link: String,
    pub webinar_title: String,
    pub webinar_date: String,
    pub webinar_time: String,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    #[error("Email delivery is not configured")]
    NotConfigured,

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP delivery failed: {0}")]
    Transport(String),
}
