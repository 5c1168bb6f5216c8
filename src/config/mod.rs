//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WEBINAR` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use webinar_registration::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod admin;
mod database;
mod email;
mod error;
mod otp;
mod payment;
mod server;

pub use admin::{AdminConfig, MIN_TOKEN_SECRET_LEN};
pub use database::DatabaseConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use otp::OtpConfig;
pub use payment::PaymentConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Constructed once in `main` and handed to adapter constructors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Payment configuration (Razorpay)
    #[serde(default)]
    pub payment: PaymentConfig,

    /// Email configuration (SMTP)
    #[serde(default)]
    pub email: EmailConfig,

    /// Admin credentials and token settings
    #[serde(default)]
    pub admin: AdminConfig,

    /// OTP policy
    #[serde(default)]
    pub otp: OtpConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WEBINAR` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WEBINAR__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `WEBINAR__PAYMENT__RAZORPAY_KEY_ID=...` -> `payment.razorpay_key_id = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("WEBINAR")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Missing Razorpay credentials are always fatal. Database, SMTP, and
    /// admin secrets are only mandatory in production.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let production = self.is_production();
        self.server.validate()?;
        self.database.validate(production)?;
        self.payment.validate()?;
        self.email.validate(production)?;
        self.admin.validate(production)?;
        self.otp.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    /// Uses double underscores to separate nested config values
    fn set_minimal_env() {
        env::set_var("WEBINAR__PAYMENT__RAZORPAY_KEY_ID", "rzp_test_abc");
        env::set_var("WEBINAR__PAYMENT__RAZORPAY_KEY_SECRET", "key_secret");
        env::set_var("WEBINAR__PAYMENT__RAZORPAY_WEBHOOK_SECRET", "webhook_secret");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("WEBINAR__PAYMENT__RAZORPAY_KEY_ID");
        env::remove_var("WEBINAR__PAYMENT__RAZORPAY_KEY_SECRET");
        env::remove_var("WEBINAR__PAYMENT__RAZORPAY_WEBHOOK_SECRET");
        env::remove_var("WEBINAR__SERVER__PORT");
        env::remove_var("WEBINAR__SERVER__ENVIRONMENT");
        env::remove_var("WEBINAR__OTP__MAX_ATTEMPTS");
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.payment.razorpay_key_id, "rzp_test_abc");
        assert_eq!(config.payment.razorpay_webhook_secret, "webhook_secret");
    }

    #[test]
    fn test_validate_minimal_development_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
        assert!(!config.database.is_configured());
    }

    #[test]
    fn test_missing_razorpay_secret_is_fatal() {
        let config = AppConfig::default();
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("RAZORPAY_KEY_ID"))
        );
    }

    #[test]
    fn test_production_requires_database() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WEBINAR__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("DATABASE__URL"))
        );
    }

    #[test]
    fn test_numeric_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WEBINAR__SERVER__PORT", "3000");
        env::set_var("WEBINAR__OTP__MAX_ATTEMPTS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.otp.max_attempts, 5);
        assert_eq!(config.otp.expiry_minutes, 10);
    }
}
