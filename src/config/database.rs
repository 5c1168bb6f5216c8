//! PostgreSQL settings for the registration, payment, OTP, and settings tables.
//!
//! Leaving `url` blank is a development convenience: the service starts on
//! the in-memory stores and loses everything on restart. Production refuses
//! to start that way.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Upper bound on `max_connections`; the checkout flow holds at most one
/// connection per request.
const POOL_CEILING: u32 = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` URL. Blank selects the in-memory stores.
    #[serde(default)]
    pub url: String,

    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Seconds a request waits for a pooled connection before failing.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,

    /// Apply the embedded `migrations/` before serving.
    #[serde(default)]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// A blank URL passes outside production; a supplied one must be a
    /// PostgreSQL URL with a sane pool.
    pub fn validate(&self, production: bool) -> Result<(), ValidationError> {
        if !self.is_configured() {
            return if production {
                Err(ValidationError::MissingRequired("DATABASE__URL"))
            } else {
                Ok(())
            };
        }

        let url = self.url.trim();
        if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
            return Err(ValidationError::InvalidDatabaseUrl);
        }
        self.check_pool()
    }

    fn check_pool(&self) -> Result<(), ValidationError> {
        match (self.min_connections, self.max_connections) {
            (min, max) if min > max => Err(ValidationError::InvalidPoolSize),
            (_, max) if max > POOL_CEILING => Err(ValidationError::PoolSizeTooLarge),
            _ => Ok(()),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            run_migrations: false,
        }
    }
}

fn default_min_connections() -> u32 {
    2
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_lifetime() -> u64 {
    1800
}
