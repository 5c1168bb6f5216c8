//! Webinar settings queries and updates, plus the public views derived
//! from them.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::registration::RegistrationError;
use crate::domain::webinar::{SettingsUpdate, WebinarSettings};
use crate::ports::SettingsStore;

pub struct WebinarSettingsHandler {
    settings: Arc<dyn SettingsStore>,
}

impl WebinarSettingsHandler {
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self { settings }
    }

    /// Admin read; store failures are errors.
    pub async fn get(&self) -> Result<WebinarSettings, RegistrationError> {
        self.settings.load().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load webinar settings");
            RegistrationError::from(e)
        })
    }

    /// Partial update; absent fields keep their stored value.
    pub async fn update(&self, update: SettingsUpdate) -> Result<WebinarSettings, RegistrationError> {
        let updated = self.settings.update(&update).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to update webinar settings");
            RegistrationError::from(e)
        })?;
        tracing::info!(
            webinar_date = %updated.webinar_date,
            webinar_title = %updated.webinar_title,
            "Webinar settings updated"
        );
        Ok(updated)
    }

    /// Public read; store failures fall back to defaults.
    pub async fn public(&self) -> WebinarSettings {
        self.settings.load().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Serving default webinar settings");
            WebinarSettings::default()
        })
    }

    /// Registration closes on the webinar date. Unknown dates and store
    /// failures leave it open.
    pub async fn registration_open(&self, today: NaiveDate) -> bool {
        match self.settings.load().await {
            Ok(settings) => settings.registration_open(today),
            Err(e) => {
                tracing::warn!(error = %e, "Settings unavailable; registration left open");
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySettingsStore;
    use crate::application::handlers::test_support::FailingSettingsStore;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn update_keeps_absent_fields() {
        let handler = WebinarSettingsHandler::new(Arc::new(InMemorySettingsStore::new()));

        let updated = handler
            .update(SettingsUpdate {
                zoom_link: Some("https://zoom.us/j/1".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.zoom_link, "https://zoom.us/j/1");
        assert_eq!(updated.webinar_date, WebinarSettings::default().webinar_date);
        assert_eq!(handler.get().await.unwrap(), updated);
    }

    #[tokio::test]
    async fn public_view_falls_back_to_defaults() {
        let handler = WebinarSettingsHandler::new(Arc::new(FailingSettingsStore));
        assert_eq!(handler.public().await, WebinarSettings::default());
        assert!(handler.get().await.is_err());
    }

    #[tokio::test]
    async fn registration_closes_on_webinar_date() {
        let handler = WebinarSettingsHandler::new(Arc::new(InMemorySettingsStore::new()));

        assert!(handler.registration_open(date(2025, 12, 9)).await);
        assert!(!handler.registration_open(date(2025, 12, 10)).await);
    }

    #[tokio::test]
    async fn store_failure_leaves_registration_open() {
        let handler = WebinarSettingsHandler::new(Arc::new(FailingSettingsStore));
        assert!(handler.registration_open(date(2030, 1, 1)).await);
    }
}
