//! PostgreSQL implementation of SettingsStore.

use crate::domain::foundation::DomainError;
use crate::domain::webinar::{
    SettingsUpdate, WebinarSettings, KEY_WEBINAR_DATE, KEY_WEBINAR_TIME, KEY_WEBINAR_TITLE,
    KEY_ZOOM_LINK,
};
use crate::ports::SettingsStore;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSettingsStore {
    pool: PgPool,
}

impl PostgresSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PostgresSettingsStore {
    async fn load(&self) -> Result<WebinarSettings, DomainError> {
        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to load settings: {}", e)))?;

        Ok(WebinarSettings::from_pairs(rows))
    }

    async fn update(&self, update: &SettingsUpdate) -> Result<WebinarSettings, DomainError> {
        let changes = [
            (KEY_WEBINAR_DATE, update.webinar_date.as_deref()),
            (KEY_WEBINAR_TIME, update.webinar_time.as_deref()),
            (KEY_WEBINAR_TITLE, update.webinar_title.as_deref()),
            (KEY_ZOOM_LINK, update.zoom_link.as_deref()),
        ];

        let mut tx = self.pool.begin().await.map_err(|e| {
            DomainError::database(format!("Failed to begin transaction: {}", e))
        })?;

        for (key, value) in changes {
            let Some(value) = value else { continue };
            sqlx::query(
                r#"
                INSERT INTO settings (key, value, updated_at) VALUES ($1, $2, NOW())
                ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to save setting {}: {}", key, e)))?;
        }

        let rows: Vec<(String, String)> = sqlx::query_as("SELECT key, value FROM settings")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| DomainError::database(format!("Failed to load settings: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit settings: {}", e)))?;

        Ok(WebinarSettings::from_pairs(rows))
    }
}
