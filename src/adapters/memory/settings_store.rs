//! In-Memory Settings Store

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::webinar::{SettingsUpdate, WebinarSettings};
use crate::ports::SettingsStore;

#[derive(Debug, Clone, Default)]
pub struct InMemorySettingsStore {
    settings: Arc<RwLock<WebinarSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: WebinarSettings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
        }
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self) -> Result<WebinarSettings, DomainError> {
        Ok(self.settings.read().await.clone())
    }

    async fn update(&self, update: &SettingsUpdate) -> Result<WebinarSettings, DomainError> {
        let mut settings = self.settings.write().await;
        settings.apply(update.clone());
        Ok(settings.clone())
    }
}
