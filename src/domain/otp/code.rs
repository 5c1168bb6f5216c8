//! One-time codes for email ownership checks.

use rand::Rng;
use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::payment::signature::constant_time_compare;

/// Number of digits in a code.
pub const OTP_LENGTH: usize = 6;

/// A generated code. Zero-padded so every code has [`OTP_LENGTH`] digits.
#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    pub fn generate() -> Self {
        let value: u32 = rand::thread_rng().gen_range(0..1_000_000);
        Self(format!("{:0width$}", value, width = OTP_LENGTH))
    }

    /// Wraps a stored code.
    pub fn from_stored(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time match against user input (surrounding whitespace ignored).
    pub fn matches(&self, submitted: &str) -> bool {
        constant_time_compare(self.0.as_bytes(), submitted.trim().as_bytes())
    }
}

impl std::fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OtpCode(******)")
    }
}

/// The single active code for an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpRecord {
    pub email: String,
    pub code: OtpCode,
    pub expires_at: Timestamp,
    pub attempts: u32,
}

impl OtpRecord {
    pub fn issue(email: impl Into<String>, code: OtpCode, expiry_minutes: i64) -> Self {
        Self {
            email: email.into(),
            code,
            expires_at: Timestamp::now().add_minutes(expiry_minutes),
            attempts: 0,
        }
    }

    pub fn is_expired(&self, now: &Timestamp) -> bool {
        !now.is_before(&self.expires_at)
    }

    /// Decides what a submission means for this record.
    pub fn check(&self, submitted: &str, max_attempts: u32, now: &Timestamp) -> OtpVerdict {
        if self.is_expired(now) {
            return OtpVerdict::Expired;
        }
        if self.attempts >= max_attempts {
            return OtpVerdict::Exhausted;
        }
        if self.code.matches(submitted) {
            return OtpVerdict::Verified;
        }
        OtpVerdict::Mismatch {
            remaining: max_attempts.saturating_sub(self.attempts + 1),
        }
    }
}

/// Outcome of checking a submitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OtpVerdict {
    /// Code matched; the record must be removed.
    Verified,
    /// Wrong code; the attempt counter must be incremented.
    Mismatch { remaining: u32 },
    /// Attempt budget used up; the record must be removed.
    Exhausted,
    /// Past expiry; treated as if no record existed.
    Expired,
}
