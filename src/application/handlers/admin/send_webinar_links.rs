//! SendWebinarLinksHandler - Emails the joining link to every paid participant.
//!
//! Sends are sequential with a fixed pause between them to stay under SMTP
//! rate limits. A failed recipient is recorded and the loop continues.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::domain::registration::{Registration, RegistrationError};
use crate::ports::{Mailer, RegistrationStore, SettingsStore, WebinarLinkEmail};

#[derive(Debug, Clone, Default)]
pub struct SendWebinarLinksCommand {
    pub zoom_link: String,
    /// Overrides the stored date for this broadcast only.
    pub webinar_date: Option<String>,
    pub webinar_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRecipient {
    pub email: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendWebinarLinksResult {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
    pub failed_emails: Vec<FailedRecipient>,
}

pub struct SendWebinarLinksHandler {
    registrations: Arc<dyn RegistrationStore>,
    settings: Arc<dyn SettingsStore>,
    mailer: Arc<dyn Mailer>,
    delay: Duration,
}

impl SendWebinarLinksHandler {
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        settings: Arc<dyn SettingsStore>,
        mailer: Arc<dyn Mailer>,
        delay: Duration,
    ) -> Self {
        Self {
            registrations,
            settings,
            mailer,
            delay,
        }
    }

    pub async fn handle(
        &self,
        cmd: SendWebinarLinksCommand,
    ) -> Result<SendWebinarLinksResult, RegistrationError> {
        let zoom_link = cmd.zoom_link.trim().to_string();
        if zoom_link.is_empty() {
            return Err(RegistrationError::validation(
                "zoom_link",
                "Zoom link is required",
            ));
        }

        let paid: Vec<Registration> = self
            .registrations
            .list_all()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load registrations for broadcast");
                RegistrationError::from(e)
            })?
            .into_iter()
            .filter(Registration::is_paid)
            .collect();

        if paid.is_empty() {
            return Err(RegistrationError::NotFound(
                "No paid registrations found".to_string(),
            ));
        }

        let settings = self.settings.load().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default webinar settings for broadcast");
            Default::default()
        });
        let webinar_date = non_blank(cmd.webinar_date).unwrap_or(settings.webinar_date);
        let webinar_time = non_blank(cmd.webinar_time).unwrap_or(settings.webinar_time);

        let mut result = SendWebinarLinksResult {
            total: paid.len(),
            sent: 0,
            failed: 0,
            failed_emails: Vec::new(),
        };

        for (index, registration) in paid.iter().enumerate() {
            if index > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let email = WebinarLinkEmail {
                to: registration.email().to_string(),
                name: registration.full_name().to_string(),
                zoom_link: zoom_link.clone(),
                webinar_title: settings.webinar_title.clone(),
                webinar_date: webinar_date.clone(),
                webinar_time: webinar_time.clone(),
            };

            match self.mailer.send_webinar_link(&email).await {
                Ok(()) => result.sent += 1,
                Err(e) => {
                    tracing::error!(email = %email.to, error = %e, "Failed to send webinar link");
                    result.failed += 1;
                    result.failed_emails.push(FailedRecipient {
                        email: email.to,
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            total = result.total,
            sent = result.sent,
            failed = result.failed,
            "Webinar link broadcast finished"
        );

        Ok(result)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
