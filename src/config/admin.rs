//! Admin surface configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Minimum HMAC key length for admin tokens.
pub const MIN_TOKEN_SECRET_LEN: usize = 32;

/// Admin credentials and capability-token settings
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// HS256 signing key for admin tokens; generated per process when empty
    /// outside production
    #[serde(default)]
    pub token_secret: String,

    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: i64,

    /// Pause between joining-link emails
    #[serde(default = "default_link_send_delay")]
    pub link_send_delay_ms: u64,
}

impl AdminConfig {
    pub fn link_send_delay(&self) -> Duration {
        Duration::from_millis(self.link_send_delay_ms)
    }

    /// Validate admin configuration
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if production {
            if self.password.is_empty() {
                return Err(ValidationError::MissingRequired("ADMIN__PASSWORD"));
            }
            if self.token_secret.is_empty() {
                return Err(ValidationError::MissingRequired("ADMIN__TOKEN_SECRET"));
            }
        }
        if !self.token_secret.is_empty() && self.token_secret.len() < MIN_TOKEN_SECRET_LEN {
            return Err(ValidationError::AdminTokenSecretTooShort);
        }
        if self.token_ttl_minutes <= 0 || self.token_ttl_minutes > 7 * 24 * 60 {
            return Err(ValidationError::InvalidTokenTtl);
        }
        Ok(())
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_username(),
            password: String::new(),
            token_secret: String::new(),
            token_ttl_minutes: default_token_ttl(),
            link_send_delay_ms: default_link_send_delay(),
        }
    }
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_token_ttl() -> i64 {
    480
}

fn default_link_send_delay() -> u64 {
    500
}
