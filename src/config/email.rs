//! Email configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (SMTP)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Send through SMTP; when false, messages are only logged
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    #[serde(default)]
    pub smtp_username: String,

    #[serde(default)]
    pub smtp_password: String,

    /// From email address
    #[serde(default = "default_sender")]
    pub sender: String,

    /// From name
    #[serde(default = "default_sender_name")]
    pub sender_name: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender)
    }

    /// True when SMTP delivery is enabled and credentials are present.
    pub fn smtp_ready(&self) -> bool {
        self.enabled && !self.smtp_username.is_empty() && !self.smtp_password.is_empty()
    }

    /// Validate email configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if !self.sender.contains('@') {
            return Err(ValidationError::InvalidSenderEmail);
        }
        if self.smtp_port == 0 {
            return Err(ValidationError::InvalidSmtpPort);
        }
        if self.enabled && production {
            if self.smtp_username.is_empty() {
                return Err(ValidationError::MissingRequired("EMAIL__SMTP_USERNAME"));
            }
            if self.smtp_password.is_empty() {
                return Err(ValidationError::MissingRequired("EMAIL__SMTP_PASSWORD"));
            }
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            sender: default_sender(),
            sender_name: default_sender_name(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_smtp_host() -> String {
    "email-smtp.us-east-1.amazonaws.com".to_string()
}

fn default_smtp_port() -> u16 {
    587
}

fn default_sender() -> String {
    "info@theneedles.in".to_string()
}

fn default_sender_name() -> String {
    "The Needles".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "email-smtp.us-east-1.amazonaws.com");
        assert_eq!(config.smtp_port, 587);
        assert_eq!(config.from_header(), "The Needles <info@theneedles.in>");
        assert!(!config.smtp_ready());
    }

    #[test]
    fn test_production_requires_credentials() {
        let config = EmailConfig::default();
        assert!(config.validate(false).is_ok());
        assert_eq!(
            config.validate(true),
            Err(ValidationError::MissingRequired("EMAIL__SMTP_USERNAME"))
        );
    }

    #[test]
    fn test_disabled_email_skips_credentials() {
        let config = EmailConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(config.validate(true).is_ok());
    }

    #[test]
    fn test_invalid_sender() {
        let config = EmailConfig {
            sender: "theneedles.in".to_string(),
            ..Default::default()
        };
        assert_eq!(config.validate(false), Err(ValidationError::InvalidSenderEmail));
    }
}
