//! Error taxonomy for the registration and payment workflow.
//!
//! Each variant maps to one HTTP status and one stable machine code.
//! Internal detail is kept out of [`RegistrationError::client_message`].

use axum::http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors surfaced by registration, payment, and admin handlers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// Malformed or missing input.
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    /// The email already has a paid registration.
    #[error("{email} is already registered for the webinar")]
    AlreadyRegistered { email: String },

    /// Client-submitted payment signature did not match.
    #[error("Payment signature verification failed")]
    InvalidSignature,

    /// Webhook body signature missing or wrong.
    #[error("Invalid webhook signature")]
    InvalidWebhookSignature,

    /// Admin capability missing, expired, or wrong.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The payment provider rejected the request.
    #[error("Payment provider error: {description}")]
    Gateway { description: String },

    /// The payment provider could not be reached.
    #[error("Payment provider unreachable: {0}")]
    Transport(String),

    /// A store operation failed; the unit of work was rolled back.
    #[error("Persistence failure: {0}")]
    Persistence(String),

    /// Email delivery failed.
    #[error("Notification failure: {0}")]
    Notification(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl RegistrationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        RegistrationError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Maps the error to an HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RegistrationError::Validation { .. }
            | RegistrationError::AlreadyRegistered { .. }
            | RegistrationError::InvalidSignature
            | RegistrationError::InvalidWebhookSignature => StatusCode::BAD_REQUEST,

            RegistrationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,

            RegistrationError::NotFound(_) => StatusCode::NOT_FOUND,

            RegistrationError::Transport(_) => StatusCode::BAD_GATEWAY,

            RegistrationError::Gateway { .. }
            | RegistrationError::Persistence(_)
            | RegistrationError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable code for the response body.
    pub fn error_code(&self) -> &'static str {
        match self {
            RegistrationError::Validation { .. } => "VALIDATION_FAILED",
            RegistrationError::AlreadyRegistered { .. } => "ALREADY_REGISTERED",
            RegistrationError::InvalidSignature => "INVALID_SIGNATURE",
            RegistrationError::InvalidWebhookSignature => "INVALID_WEBHOOK_SIGNATURE",
            RegistrationError::Unauthorized(_) => "UNAUTHORIZED",
            RegistrationError::Gateway { .. } => "PAYMENT_PROVIDER_ERROR",
            RegistrationError::Transport(_) => "PAYMENT_PROVIDER_UNAVAILABLE",
            RegistrationError::Persistence(_) => "INTERNAL_ERROR",
            RegistrationError::Notification(_) => "NOTIFICATION_FAILED",
            RegistrationError::NotFound(_) => "NOT_FOUND",
        }
    }

    /// Message safe to show a client.
    ///
    /// Persistence and transport detail is replaced with a generic text;
    /// the full error is only ever logged.
    pub fn client_message(&self) -> String {
        match self {
            RegistrationError::Validation { message, .. } => message.clone(),
            RegistrationError::Persistence(_) => {
                "An internal error occurred. Please try again later.".to_string()
            }
            RegistrationError::Transport(_) => {
                "Payment provider is temporarily unavailable".to_string()
            }
            RegistrationError::Notification(_) => "Failed to send email".to_string(),
            RegistrationError::Gateway { .. } => "Failed to create order".to_string(),
            RegistrationError::Unauthorized(_) => "Unauthorized".to_string(),
            RegistrationError::NotFound(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            RegistrationError::Transport(_)
                | RegistrationError::Persistence(_)
                | RegistrationError::Notification(_)
        )
    }
}

impl From<DomainError> for RegistrationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => RegistrationError::Validation {
                field: err.details.get("field").cloned().unwrap_or_default(),
                message: err.message,
            },
            ErrorCode::NotFound => RegistrationError::NotFound(err.message),
            ErrorCode::ExternalServiceError => RegistrationError::Transport(err.message),
            ErrorCode::Conflict | ErrorCode::DatabaseError | ErrorCode::InternalError => {
                RegistrationError::Persistence(err.message)
            }
        }
    }
}
