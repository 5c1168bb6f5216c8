//! Admin capability tokens.
//!
//! A token proves a successful admin login and carries nothing else.
//! Verification is synchronous: tokens are self-contained.

use thiserror::Error;

/// Scope claim every admin token must carry.
pub const ADMIN_SCOPE: &str = "admin";

pub trait AdminTokens: Send + Sync {
    /// Issues a token for `subject` valid for the configured lifetime.
    fn issue(&self, subject: &str) -> Result<IssuedToken, AdminAuthError>;

    /// Checks signature, expiry, and scope.
    fn verify(&self, token: &str) -> Result<AdminClaims, AdminAuthError>;
}

/// A freshly signed token and its expiry (unix seconds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Claims recovered from a valid token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminClaims {
    pub subject: String,
    pub expires_at: i64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AdminAuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing admin token")]
    MissingToken,

    #[error("Admin token expired")]
    Expired,

    #[error("Invalid admin token")]
    InvalidToken,

    #[error("Failed to sign admin token: {0}")]
    Signing(String),
}
