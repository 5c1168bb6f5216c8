//! HTTP DTOs for the unauthenticated endpoints.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::webinar::WebinarSettings;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct EmailRequest {
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateContactRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub whatsapp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Plain `{success, message}` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckEmailResponse {
    pub success: bool,
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactErrorsResponse {
    pub success: bool,
    pub errors: BTreeMap<&'static str, &'static str>,
}

/// Public webinar details; the joining link is never included.
#[derive(Debug, Clone, Serialize)]
pub struct WebinarInfoResponse {
    pub success: bool,
    pub webinar_date: String,
    pub webinar_time: String,
    pub webinar_title: String,
}

impl From<WebinarSettings> for WebinarInfoResponse {
    fn from(settings: WebinarSettings) -> Self {
        Self {
            success: true,
            webinar_date: settings.webinar_date,
            webinar_time: settings.webinar_time,
            webinar_title: settings.webinar_title,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationStatusResponse {
    pub success: bool,
    pub registration_open: bool,
    pub message: String,
}

impl RegistrationStatusResponse {
    pub fn new(open: bool) -> Self {
        let message = if open {
            "Registration is open"
        } else {
            "Registration is closed. The webinar has already started or ended."
        };
        Self {
            success: true,
            registration_open: open,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
