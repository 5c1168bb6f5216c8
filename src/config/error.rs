//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address")]
    InvalidBindAddress,

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid Razorpay key id format")]
    InvalidRazorpayKeyId,

    #[error("Invalid payment API base URL")]
    InvalidPaymentBaseUrl,

    #[error("Invalid default currency")]
    InvalidCurrency,

    #[error("Invalid sender email address")]
    InvalidSenderEmail,

    #[error("Invalid SMTP port")]
    InvalidSmtpPort,

    #[error("Admin token secret must be at least 32 bytes")]
    AdminTokenSecretTooShort,

    #[error("Invalid admin token lifetime")]
    InvalidTokenTtl,

    #[error("Invalid OTP policy")]
    InvalidOtpPolicy,
}
