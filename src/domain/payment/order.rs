//! Order request construction and the created-order shape.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::Timestamp;
use crate::domain::registration::validators::normalize_email;
use crate::domain::registration::RegistrationError;

/// Currency used when the client does not name one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Order amount when the checkout page omits one: one rupee in paise.
pub const DEFAULT_ORDER_AMOUNT: i64 = 100;

/// Prefix of generated receipts; the suffix is the Unix time.
pub const RECEIPT_PREFIX: &str = "webinar_";

/// Validated input for creating a provider order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRequest {
    /// Minor units; always positive.
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: Map<String, Value>,
}

impl OrderRequest {
    /// Applies defaults and checks the amount and currency.
    ///
    /// # Errors
    ///
    /// `Validation` if the amount is not positive or the currency is not a
    /// three-letter code.
    pub fn new(
        amount: i64,
        currency: Option<String>,
        receipt: Option<String>,
        notes: Option<Map<String, Value>>,
    ) -> Result<Self, RegistrationError> {
        if amount <= 0 {
            return Err(RegistrationError::validation(
                "amount",
                "Amount must be a positive integer in minor units",
            ));
        }

        let currency = currency
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(RegistrationError::validation(
                "currency",
                "Currency must be a three-letter code",
            ));
        }

        let receipt = receipt
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(generate_receipt);

        Ok(Self {
            amount,
            currency,
            receipt,
            notes: notes.unwrap_or_default(),
        })
    }

    /// Email carried in the notes, if any.
    pub fn notes_email(&self) -> Option<String> {
        self.notes
            .get("email")
            .and_then(Value::as_str)
            .map(normalize_email)
            .filter(|e| !e.is_empty())
    }
}

fn generate_receipt() -> String {
    format!("{}{}", RECEIPT_PREFIX, Timestamp::now().unix_seconds())
}

/// An order as returned by the provider.
///
/// Fields beyond the ones the workflow reads are kept verbatim so the
/// client receives the full provider response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
