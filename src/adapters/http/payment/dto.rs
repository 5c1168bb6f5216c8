//! HTTP DTOs for the checkout and webhook endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::application::handlers::VerifyPaymentResult;
use crate::domain::foundation::RegistrationId;
use crate::domain::payment::DEFAULT_ORDER_AMOUNT;
use crate::domain::registration::ParticipantProfile;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a provider order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    /// Minor units (paise for INR).
    #[serde(default = "default_order_amount")]
    pub amount: i64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub notes: Option<Map<String, Value>>,
    #[serde(default)]
    pub email: Option<String>,
}

fn default_order_amount() -> i64 {
    DEFAULT_ORDER_AMOUNT
}

/// Checkout callback forwarded by the client after payment.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    #[serde(default)]
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: String,
    #[serde(default)]
    pub razorpay_signature: String,
    #[serde(default, rename = "userData")]
    pub user_data: UserData,
}

/// Registration form as the checkout page submits it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub business_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl UserData {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Amount in minor units; missing or negative becomes zero.
    pub fn amount_minor(&self) -> i64 {
        self.amount.map(|a| a.round() as i64).unwrap_or(0).max(0)
    }

    pub fn into_profile(self) -> ParticipantProfile {
        ParticipantProfile::new(self.full_name(), &self.email, self.phone)
            .with_whatsapp(self.whatsapp)
            .with_city(self.city)
            .with_state(self.state)
            .with_business_name(self.business_name)
            .with_business_type(self.category)
            .with_experience_level(self.experience)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub order_id: String,
    pub payment_id: String,
    pub registration_id: RegistrationId,
}

impl From<VerifyPaymentResult> for VerifyPaymentResponse {
    fn from(result: VerifyPaymentResult) -> Self {
        Self {
            success: true,
            message: "Payment verified successfully".to_string(),
            order_id: result.order_id,
            payment_id: result.payment_id,
            registration_id: result.registration_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WebhookAck {
    pub received: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn omitted_order_amount_defaults_to_one_rupee() {
        let request: CreateOrderRequest =
            serde_json::from_value(json!({ "notes": { "email": "a@x.com" } })).unwrap();

        assert_eq!(request.amount, 100);
        assert_eq!(request.currency, None);
    }

    #[test]
    fn explicit_order_amount_is_kept() {
        let request: CreateOrderRequest =
            serde_json::from_value(json!({ "amount": 49900, "currency": "INR" })).unwrap();

        assert_eq!(request.amount, 49900);
    }

    #[test]
    fn user_data_maps_form_fields_onto_profile() {
        let request: VerifyPaymentRequest = serde_json::from_value(json!({
            "razorpay_order_id": "order_1",
            "razorpay_payment_id": "pay_1",
            "razorpay_signature": "sig",
            "userData": {
                "firstName": "Asha",
                "lastName": "Rao",
                "email": "Asha@X.com",
                "phone": "9876543210",
                "whatsapp": "9876543210",
                "city": "Pune",
                "category": "Boutique",
                "experience": "1-3 years",
                "amount": 100
            }
        }))
        .unwrap();

        assert_eq!(request.user_data.amount_minor(), 100);
        let profile = request.user_data.into_profile();
        assert_eq!(profile.full_name, "Asha Rao");
        assert_eq!(profile.email, "asha@x.com");
        assert_eq!(profile.business_type.as_deref(), Some("Boutique"));
        assert_eq!(profile.experience_level.as_deref(), Some("1-3 years"));
        assert_eq!(profile.state, None);
    }

    #[test]
    fn missing_user_data_yields_empty_profile() {
        let request: VerifyPaymentRequest =
            serde_json::from_value(json!({ "razorpay_order_id": "order_1" })).unwrap();

        assert_eq!(request.user_data.amount_minor(), 0);
        assert!(request.user_data.into_profile().validate().is_err());
    }
}
