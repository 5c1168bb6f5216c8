//! Strongly-typed identifier value objects.
//!
//! Both identifiers are assigned by the store on insert (BIGSERIAL), so
//! there is no `new()`; they only come back from persistence.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a registration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(i64);

impl RegistrationId {
    /// Wraps a store-assigned identifier.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaymentId(i64);

impl PaymentId {
    /// Wraps a store-assigned identifier.
    pub fn from_i64(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw identifier.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PaymentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
