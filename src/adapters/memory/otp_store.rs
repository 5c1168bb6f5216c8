//! In-Memory OTP Store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::otp::OtpRecord;
use crate::ports::OtpStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryOtpStore {
    records: Arc<RwLock<HashMap<String, OtpRecord>>>,
}

impl InMemoryOtpStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn replace(&self, record: &OtpRecord) -> Result<(), DomainError> {
        self.records
            .write()
            .await
            .insert(record.email.clone(), record.clone());
        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<OtpRecord>, DomainError> {
        Ok(self.records.read().await.get(email).cloned())
    }

    async fn increment_attempts(&self, email: &str) -> Result<(), DomainError> {
        if let Some(record) = self.records.write().await.get_mut(email) {
            record.attempts += 1;
        }
        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<(), DomainError> {
        self.records.write().await.remove(email);
        Ok(())
    }
}
