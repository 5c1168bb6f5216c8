//! Field-format validators for participant contact details.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid")
});

/// Checks the basic `local@domain.tld` shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Checks an Indian mobile number.
///
/// Non-digits are stripped first; the result must be 10 digits, or 12
/// digits carrying the `91` country code.
pub fn is_valid_phone(phone: &str) -> bool {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.len() == 10 || (digits.len() == 12 && digits.starts_with("91"))
}

/// Lowercases and trims an email so it can serve as the natural key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Per-field problems with a contact form; empty when everything is valid.
pub fn contact_errors(
    email: Option<&str>,
    phone: Option<&str>,
    whatsapp: Option<&str>,
) -> BTreeMap<&'static str, &'static str> {
    let mut errors = BTreeMap::new();
    if !email.map(str::trim).map_or(false, is_valid_email) {
        errors.insert("email", "Please enter a valid email address");
    }
    if !phone.map_or(false, is_valid_phone) {
        errors.insert("phone", "Please enter a valid 10-digit phone number");
    }
    if !whatsapp.map_or(false, is_valid_phone) {
        errors.insert("whatsapp", "Please enter a valid 10-digit WhatsApp number");
    }
    errors
}
