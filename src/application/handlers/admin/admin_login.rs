//! AdminLoginHandler - Exchanges configured credentials for a capability token.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::domain::payment::signature::constant_time_compare;
use crate::ports::{AdminAuthError, AdminClaims, AdminTokens, IssuedToken};

pub struct AdminLoginHandler {
    username: String,
    password: SecretString,
    tokens: Arc<dyn AdminTokens>,
}

impl AdminLoginHandler {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        tokens: Arc<dyn AdminTokens>,
    ) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
            tokens,
        }
    }

    /// Both fields are compared in constant time. An unset password never
    /// matches.
    pub fn login(&self, username: &str, password: &str) -> Result<IssuedToken, AdminAuthError> {
        let username = username.trim();
        let configured = self.password.expose_secret();

        let user_ok = constant_time_compare(self.username.as_bytes(), username.as_bytes());
        let pass_ok = constant_time_compare(configured.as_bytes(), password.trim().as_bytes());

        if configured.is_empty() || !(user_ok & pass_ok) {
            tracing::warn!(username = %username, "Admin login rejected");
            return Err(AdminAuthError::InvalidCredentials);
        }

        let issued = self.tokens.issue(username)?;
        tracing::info!(username = %username, "Admin logged in");
        Ok(issued)
    }

    pub fn verify(&self, token: Option<&str>) -> Result<AdminClaims, AdminAuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AdminAuthError::MissingToken)?;
        self.tokens.verify(token)
    }
}
