//! VerifyOtpHandler - Checks a submitted code against the active record.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::otp::{OtpError, OtpVerdict};
use crate::domain::registration::validators::normalize_email;
use crate::ports::OtpStore;

pub struct VerifyOtpHandler {
    store: Arc<dyn OtpStore>,
    max_attempts: u32,
}

impl VerifyOtpHandler {
    pub fn new(store: Arc<dyn OtpStore>, max_attempts: u32) -> Self {
        Self {
            store,
            max_attempts,
        }
    }

    pub async fn handle(&self, email: &str, submitted: &str) -> Result<(), OtpError> {
        let email = normalize_email(email);
        if submitted.trim().is_empty() {
            return Err(OtpError::MissingCode);
        }

        let Some(record) = self.store.find(&email).await? else {
            return Err(OtpError::Expired);
        };

        match record.check(submitted, self.max_attempts, &Timestamp::now()) {
            OtpVerdict::Verified => {
                self.store.delete(&email).await?;
                tracing::info!(email = %email, "Email verified");
                Ok(())
            }
            OtpVerdict::Mismatch { remaining } => {
                self.store.increment_attempts(&email).await?;
                tracing::debug!(email = %email, remaining, "OTP mismatch");
                Err(OtpError::Mismatch { remaining })
            }
            OtpVerdict::Exhausted => {
                self.store.delete(&email).await?;
                tracing::warn!(email = %email, "OTP attempts exhausted");
                Err(OtpError::TooManyAttempts)
            }
            OtpVerdict::Expired => {
                self.store.delete(&email).await?;
                Err(OtpError::Expired)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOtpStore;
    use crate::domain::otp::{OtpCode, OtpRecord};

    async fn store_with(code: &str, expiry_minutes: i64) -> Arc<InMemoryOtpStore> {
        let store = Arc::new(InMemoryOtpStore::new());
        store
            .replace(&OtpRecord::issue(
                "a@x.com",
                OtpCode::from_stored(code),
                expiry_minutes,
            ))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn correct_code_verifies_once() {
        let store = store_with("123456", 10).await;
        let handler = VerifyOtpHandler::new(store.clone(), 3);

        assert_eq!(handler.handle("a@x.com", "123456").await, Ok(()));
        assert_eq!(
            handler.handle("a@x.com", "123456").await,
            Err(OtpError::Expired)
        );
    }

    #[tokio::test]
    async fn wrong_codes_count_down_then_exhaust() {
        let store = store_with("123456", 10).await;
        let handler = VerifyOtpHandler::new(store.clone(), 3);

        assert_eq!(
            handler.handle("a@x.com", "000000").await,
            Err(OtpError::Mismatch { remaining: 2 })
        );
        assert_eq!(
            handler.handle("a@x.com", "000000").await,
            Err(OtpError::Mismatch { remaining: 1 })
        );
        assert_eq!(
            handler.handle("a@x.com", "000000").await,
            Err(OtpError::Mismatch { remaining: 0 })
        );
        assert_eq!(
            handler.handle("a@x.com", "123456").await,
            Err(OtpError::TooManyAttempts)
        );
        assert!(store.find("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn expired_code_is_rejected_and_removed() {
        let store = store_with("123456", -1).await;
        let handler = VerifyOtpHandler::new(store.clone(), 3);

        assert_eq!(
            handler.handle("a@x.com", "123456").await,
            Err(OtpError::Expired)
        );
        assert!(store.find("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn blank_code_is_rejected() {
        let handler = VerifyOtpHandler::new(Arc::new(InMemoryOtpStore::new()), 3);
        assert_eq!(handler.handle("a@x.com", " ").await, Err(OtpError::MissingCode));
    }
}
