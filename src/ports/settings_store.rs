//! Settings store port - webinar schedule key/value pairs.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::webinar::{SettingsUpdate, WebinarSettings};

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Current settings; keys never written come back as defaults.
    async fn load(&self) -> Result<WebinarSettings, DomainError>;

    /// Writes the present fields of `update` and returns the result.
    async fn update(&self, update: &SettingsUpdate) -> Result<WebinarSettings, DomainError>;
}
