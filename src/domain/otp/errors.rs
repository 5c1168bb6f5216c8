//! OTP error types.

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::DomainError;

/// Errors from sending or verifying a one-time code.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OtpError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("OTP is required")]
    MissingCode,

    #[error("OTP not found or expired. Please request a new one.")]
    Expired,

    #[error("Too many failed attempts. Please request a new OTP.")]
    TooManyAttempts,

    #[error("Invalid OTP. {remaining} attempts remaining.")]
    Mismatch { remaining: u32 },

    /// The code could not be emailed.
    #[error("OTP delivery failed: {0}")]
    Delivery(String),

    #[error("OTP storage failed: {0}")]
    Store(String),
}

impl OtpError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OtpError::Delivery(_) | OtpError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OtpError::InvalidEmail | OtpError::MissingCode => "VALIDATION_FAILED",
            OtpError::Expired => "OTP_EXPIRED",
            OtpError::TooManyAttempts => "OTP_ATTEMPTS_EXHAUSTED",
            OtpError::Mismatch { .. } => "OTP_MISMATCH",
            OtpError::Delivery(_) => "OTP_DELIVERY_FAILED",
            OtpError::Store(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show a client.
    pub fn client_message(&self) -> String {
        match self {
            OtpError::Delivery(_) => {
                "Failed to send OTP. Please try again or contact support.".to_string()
            }
            OtpError::Store(_) => "OTP verification failed".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<DomainError> for OtpError {
    fn from(err: DomainError) -> Self {
        OtpError::Store(err.message)
    }
}
