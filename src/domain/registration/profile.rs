//! ParticipantProfile - the participant-supplied part of a registration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::errors::RegistrationError;
use super::validators::{is_valid_email, normalize_email};

/// Profile fields captured at checkout.
///
/// Written once, when the registration row is first created. Later
/// submissions for the same email never overwrite these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantProfile {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub whatsapp_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub experience_level: Option<String>,
}

impl ParticipantProfile {
    /// Creates a profile with the required fields; the rest start empty.
    pub fn new(full_name: impl Into<String>, email: &str, phone: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into().trim().to_string(),
            email: normalize_email(email),
            phone: phone.into().trim().to_string(),
            whatsapp_number: None,
            city: None,
            state: None,
            business_name: None,
            business_type: None,
            experience_level: None,
        }
    }

    pub fn with_whatsapp(mut self, value: Option<String>) -> Self {
        self.whatsapp_number = non_blank(value);
        self
    }

    pub fn with_city(mut self, value: Option<String>) -> Self {
        self.city = non_blank(value);
        self
    }

    pub fn with_state(mut self, value: Option<String>) -> Self {
        self.state = non_blank(value);
        self
    }

    pub fn with_business_name(mut self, value: Option<String>) -> Self {
        self.business_name = non_blank(value);
        self
    }

    pub fn with_business_type(mut self, value: Option<String>) -> Self {
        self.business_type = non_blank(value);
        self
    }

    pub fn with_experience_level(mut self, value: Option<String>) -> Self {
        self.experience_level = non_blank(value);
        self
    }

    /// Checks the fields a registration row cannot exist without.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        if self.email.is_empty() || !is_valid_email(&self.email) {
            return Err(RegistrationError::validation("email", "Invalid email address"));
        }
        if self.full_name.is_empty() {
            return Err(RegistrationError::validation("full_name", "Name is required"));
        }
        Ok(())
    }

    /// Builds a profile from order notes attached at order creation.
    ///
    /// Used by the webhook path, which carries no client-submitted profile.
    /// Returns `None` unless the notes hold at least an email and a name.
    pub fn from_order_notes(notes: &Map<String, Value>, contact: Option<&str>) -> Option<Self> {
        let text = |key: &str| -> Option<String> {
            notes
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        let email = text("email")?;
        let full_name = text("name").or_else(|| {
            let joined = format!(
                "{} {}",
                text("firstName").unwrap_or_default(),
                text("lastName").unwrap_or_default()
            );
            let joined = joined.trim().to_string();
            (!joined.is_empty()).then_some(joined)
        })?;
        let phone = text("phone")
            .or_else(|| contact.map(str::to_string))
            .unwrap_or_default();

        let profile = ParticipantProfile::new(full_name, &email, phone)
            .with_whatsapp(text("whatsapp"))
            .with_city(text("city"))
            .with_state(text("state"))
            .with_business_name(text("businessName"))
            .with_business_type(text("category"))
            .with_experience_level(text("experience"));

        profile.validate().ok().map(|_| profile)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn notes(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn new_normalizes_email_and_trims_name() {
        let profile = ParticipantProfile::new("  Asha Rao ", " Asha@X.com ", "9876543210");
        assert_eq!(profile.full_name, "Asha Rao");
        assert_eq!(profile.email, "asha@x.com");
    }

    #[test]
    fn builders_drop_blank_values() {
        let profile = ParticipantProfile::new("Asha", "a@x.com", "9876543210")
            .with_city(Some("   ".to_string()))
            .with_state(Some("Goa".to_string()));
        assert_eq!(profile.city, None);
        assert_eq!(profile.state, Some("Goa".to_string()));
    }

    #[test]
    fn validate_rejects_bad_email() {
        let profile = ParticipantProfile::new("Asha", "not-an-email", "9876543210");
        assert!(matches!(
            profile.validate(),
            Err(RegistrationError::Validation { field, .. }) if field == "email"
        ));
    }

    #[test]
    fn validate_rejects_missing_name() {
        let profile = ParticipantProfile::new("  ", "a@x.com", "9876543210");
        assert!(profile.validate().is_err());
    }

    #[test]
    fn from_order_notes_uses_name_and_contact() {
        let notes = notes(json!({"email": "A@x.com", "name": "Asha Rao", "city": "Pune"}));
        let profile = ParticipantProfile::from_order_notes(&notes, Some("+919876543210")).unwrap();
        assert_eq!(profile.email, "a@x.com");
        assert_eq!(profile.full_name, "Asha Rao");
        assert_eq!(profile.phone, "+919876543210");
        assert_eq!(profile.city, Some("Pune".to_string()));
    }

    #[test]
    fn from_order_notes_joins_first_and_last_name() {
        let notes = notes(json!({"email": "a@x.com", "firstName": "Asha", "lastName": "Rao"}));
        let profile = ParticipantProfile::from_order_notes(&notes, None).unwrap();
        assert_eq!(profile.full_name, "Asha Rao");
    }

    #[test]
    fn from_order_notes_requires_email_and_name() {
        assert!(ParticipantProfile::from_order_notes(&notes(json!({"name": "Asha"})), None).is_none());
        assert!(
            ParticipantProfile::from_order_notes(&notes(json!({"email": "a@x.com"})), None).is_none()
        );
    }
}
