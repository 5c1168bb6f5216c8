//! Razorpay signature verification.
//!
//! Two schemes, both HMAC-SHA256 rendered as lowercase hex:
//!
//! - payment signature: `HMAC(key_secret, "{order_id}|{payment_id}")`
//! - webhook signature: `HMAC(webhook_secret, raw_body)`
//!
//! Comparison is constant-time over the hex text. Malformed or mismatched
//! signatures yield `false`; only missing secrets are an error.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Raised when a verifier is built without its secrets.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignatureConfigError {
    #[error("Razorpay key secret is not configured")]
    MissingKeySecret,

    #[error("Razorpay webhook secret is not configured")]
    MissingWebhookSecret,
}

/// Verifies a client-submitted payment signature.
pub fn verify_payment_signature(
    order_id: &str,
    payment_id: &str,
    signature: &str,
    secret: &str,
) -> bool {
    let message = format!("{}|{}", order_id, payment_id);
    let expected = compute_signature(secret.as_bytes(), message.as_bytes());
    constant_time_compare(expected.as_bytes(), signature.as_bytes())
}

/// Verifies a webhook signature over the exact request body bytes.
pub fn verify_webhook_signature(raw_body: &[u8], signature: &str, secret: &str) -> bool {
    let expected = compute_signature(secret.as_bytes(), raw_body);
    constant_time_compare(expected.as_bytes(), signature.as_bytes())
}

/// HMAC-SHA256 of `message` under `key`, lowercase hex.
pub fn compute_signature(key: &[u8], message: &[u8]) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts any key");
    mac.update(message);
    hex::encode(mac.finalize().into_bytes())
}

/// Performs constant-time comparison of two byte slices.
pub fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Holds both Razorpay secrets for the lifetime of the process.
#[derive(Clone)]
pub struct SignatureVerifier {
    key_secret: SecretString,
    webhook_secret: SecretString,
}

impl SignatureVerifier {
    /// Creates a verifier; fails if either secret is empty.
    pub fn new(
        key_secret: impl Into<String>,
        webhook_secret: impl Into<String>,
    ) -> Result<Self, SignatureConfigError> {
        let key_secret = key_secret.into();
        let webhook_secret = webhook_secret.into();

        if key_secret.trim().is_empty() {
            return Err(SignatureConfigError::MissingKeySecret);
        }
        if webhook_secret.trim().is_empty() {
            return Err(SignatureConfigError::MissingWebhookSecret);
        }

        Ok(Self {
            key_secret: SecretString::new(key_secret),
            webhook_secret: SecretString::new(webhook_secret),
        })
    }

    pub fn verify_payment(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        verify_payment_signature(
            order_id,
            payment_id,
            signature,
            self.key_secret.expose_secret(),
        )
    }

    pub fn verify_webhook(&self, raw_body: &[u8], signature: &str) -> bool {
        verify_webhook_signature(raw_body, signature, self.webhook_secret.expose_secret())
    }
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier").finish_non_exhaustive()
    }
}

/// Payment signature for test fixtures.
#[cfg(test)]
pub fn sign_payment(order_id: &str, payment_id: &str, secret: &str) -> String {
    compute_signature(
        secret.as_bytes(),
        format!("{}|{}", order_id, payment_id).as_bytes(),
    )
}
