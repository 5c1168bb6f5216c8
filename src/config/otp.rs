//! OTP policy configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    #[serde(default = "default_expiry_minutes")]
    pub expiry_minutes: i64,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl OtpConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.expiry_minutes <= 0 || self.expiry_minutes > 60 || self.max_attempts == 0 {
            return Err(ValidationError::InvalidOtpPolicy);
        }
        Ok(())
    }
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            expiry_minutes: default_expiry_minutes(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_expiry_minutes() -> i64 {
    10
}

fn default_max_attempts() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OtpConfig::default();
        assert_eq!(config.expiry_minutes, 10);
        assert_eq!(config.max_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_attempts_rejected() {
        let config = OtpConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidOtpPolicy));
    }
}
