//! HTTP DTOs for the admin surface.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{FailedRecipient, SendWebinarLinksCommand, SendWebinarLinksResult};
use crate::domain::registration::Registration;
use crate::domain::webinar::WebinarSettings;
use crate::ports::IssuedToken;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SendWebinarLinksRequest {
    #[serde(default)]
    pub zoom_link: String,
    #[serde(default)]
    pub webinar_date: Option<String>,
    #[serde(default)]
    pub webinar_time: Option<String>,
}

impl From<SendWebinarLinksRequest> for SendWebinarLinksCommand {
    fn from(request: SendWebinarLinksRequest) -> Self {
        Self {
            zoom_link: request.zoom_link,
            webinar_date: request.webinar_date,
            webinar_time: request.webinar_time,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub token: String,
    pub username: String,
    /// Unix seconds.
    pub expires_at: i64,
}

impl LoginResponse {
    pub fn new(issued: IssuedToken, username: String) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            token: issued.token,
            username,
            expires_at: issued.expires_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RegistrationsResponse {
    pub success: bool,
    pub total: usize,
    pub registrations: Vec<Registration>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendWebinarLinksResponse {
    pub success: bool,
    pub message: String,
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub failed_emails: Vec<FailedRecipient>,
}

impl From<SendWebinarLinksResult> for SendWebinarLinksResponse {
    fn from(result: SendWebinarLinksResult) -> Self {
        Self {
            success: true,
            message: "Webinar links sent successfully".to_string(),
            total: result.total,
            sent: result.sent,
            failed: result.failed,
            failed_emails: result.failed_emails,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub settings: WebinarSettings,
}
