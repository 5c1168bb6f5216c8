//! Payment configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Payment configuration (Razorpay)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay key id (`rzp_test_...` or `rzp_live_...`)
    #[serde(default)]
    pub razorpay_key_id: String,

    /// Razorpay key secret; also signs checkout confirmations
    #[serde(default)]
    pub razorpay_key_secret: String,

    /// Razorpay webhook signing secret
    #[serde(default)]
    pub razorpay_webhook_secret: String,

    /// Provider API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Outbound request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Currency used when a create-order request names none
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// Check if using Razorpay test mode
    pub fn is_test_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_test_")
    }

    /// Check if using Razorpay live mode
    pub fn is_live_mode(&self) -> bool {
        self.razorpay_key_id.starts_with("rzp_live_")
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay_key_id.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_ID"));
        }
        if self.razorpay_key_secret.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_KEY_SECRET"));
        }
        if self.razorpay_webhook_secret.is_empty() {
            return Err(ValidationError::MissingRequired("RAZORPAY_WEBHOOK_SECRET"));
        }
        if !self.razorpay_key_id.starts_with("rzp_") {
            return Err(ValidationError::InvalidRazorpayKeyId);
        }
        if !self.api_base_url.starts_with("https://") && !self.api_base_url.starts_with("http://")
        {
            return Err(ValidationError::InvalidPaymentBaseUrl);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            razorpay_key_id: String::new(),
            razorpay_key_secret: String::new(),
            razorpay_webhook_secret: String::new(),
            api_base_url: default_api_base_url(),
            request_timeout_secs: default_request_timeout(),
            currency: default_currency(),
        }
    }
}

fn default_api_base_url() -> String {
    "https://api.razorpay.com".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_currency() -> String {
    "INR".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PaymentConfig {
        PaymentConfig {
            razorpay_key_id: "rzp_test_abc".to_string(),
            razorpay_key_secret: "secret".to_string(),
            razorpay_webhook_secret: "whsecret".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = PaymentConfig::default();
        assert_eq!(config.api_base_url, "https://api.razorpay.com");
        assert_eq!(config.request_timeout(), Duration::from_secs(15));
        assert_eq!(config.currency, "INR");
    }

    #[test]
    fn test_is_test_mode() {
        let config = valid();
        assert!(config.is_test_mode());
        assert!(!config.is_live_mode());
    }

    #[test]
    fn test_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_missing_secrets_are_fatal() {
        let config = PaymentConfig {
            razorpay_key_secret: String::new(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("RAZORPAY_KEY_SECRET"))
        );

        let config = PaymentConfig {
            razorpay_webhook_secret: String::new(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("RAZORPAY_WEBHOOK_SECRET"))
        );
    }

    #[test]
    fn test_invalid_key_prefix() {
        let config = PaymentConfig {
            razorpay_key_id: "sk_test_abc".to_string(),
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidRazorpayKeyId));
    }

    #[test]
    fn test_invalid_currency() {
        let config = PaymentConfig {
            currency: "inr".to_string(),
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidCurrency));
    }
}
