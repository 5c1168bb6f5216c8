//! PaymentStatus - last known payment state of a registration or payment row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Payment state shared by registrations and payment rows.
///
/// Transitions are driven by reconciliation:
///
/// ```text
/// pending ──► success
///    │           ▲
///    ▼           │
///  failed ───────┘
/// ```
///
/// `success` is terminal: a late failure report never downgrades it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Success,
    Failed,
}

impl PaymentStatus {
    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        }
    }

    /// Whether this status may be replaced by `next`.
    pub fn can_transition_to(&self, next: PaymentStatus) -> bool {
        !matches!(
            (self, next),
            (PaymentStatus::Success, PaymentStatus::Failed)
                | (PaymentStatus::Success, PaymentStatus::Pending)
        )
    }

    pub fn is_success(&self) -> bool {
        *self == PaymentStatus::Success
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(PaymentStatus::Pending),
            "success" => Ok(PaymentStatus::Success),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(format!("Invalid payment status: {}", other)),
        }
    }
}
