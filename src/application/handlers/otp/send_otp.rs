//! SendOtpHandler - Issues a fresh code and emails it.

use std::sync::Arc;

use crate::domain::otp::{OtpCode, OtpError, OtpRecord};
use crate::domain::registration::validators::{is_valid_email, normalize_email};
use crate::ports::{Mailer, OtpStore};

pub struct SendOtpHandler {
    store: Arc<dyn OtpStore>,
    mailer: Arc<dyn Mailer>,
    expiry_minutes: i64,
}

impl SendOtpHandler {
    pub fn new(store: Arc<dyn OtpStore>, mailer: Arc<dyn Mailer>, expiry_minutes: i64) -> Self {
        Self {
            store,
            mailer,
            expiry_minutes,
        }
    }

    /// Replaces any previous code for the email. Delivery failure is an
    /// error here: an unsent code cannot be verified.
    pub async fn handle(&self, email: &str) -> Result<(), OtpError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(OtpError::InvalidEmail);
        }

        let code = OtpCode::generate();
        let record = OtpRecord::issue(email.clone(), code.clone(), self.expiry_minutes);
        self.store.replace(&record).await.map_err(|e| {
            tracing::error!(email = %email, error = %e, "Failed to store OTP");
            OtpError::from(e)
        })?;

        self.mailer
            .send_otp(&email, &code, self.expiry_minutes)
            .await
            .map_err(|e| {
                tracing::error!(email = %email, error = %e, "Failed to send OTP email");
                OtpError::Delivery(e.to_string())
            })?;

        tracing::info!(email = %email, "OTP sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryOtpStore;
    use crate::application::handlers::test_support::{RecordingMailer, SentMail};

    #[tokio::test]
    async fn stores_and_sends_code() {
        let store = Arc::new(InMemoryOtpStore::new());
        let mailer = Arc::new(RecordingMailer::new());
        let handler = SendOtpHandler::new(store.clone(), mailer.clone(), 10);

        handler.handle(" A@X.com ").await.unwrap();

        let record = store.find("a@x.com").await.unwrap().unwrap();
        assert_eq!(record.attempts, 0);
        match &mailer.sent()[0] {
            SentMail::Otp { to, code } => {
                assert_eq!(to, "a@x.com");
                assert_eq!(code, record.code.as_str());
            }
            other => panic!("unexpected mail {:?}", other),
        }
    }

    #[tokio::test]
    async fn resend_replaces_previous_code() {
        let store = Arc::new(InMemoryOtpStore::new());
        let handler = SendOtpHandler::new(store.clone(), Arc::new(RecordingMailer::new()), 10);

        handler.handle("a@x.com").await.unwrap();
        store.increment_attempts("a@x.com").await.unwrap();
        handler.handle("a@x.com").await.unwrap();

        assert_eq!(store.find("a@x.com").await.unwrap().unwrap().attempts, 0);
    }

    #[tokio::test]
    async fn invalid_email_is_rejected() {
        let mailer = Arc::new(RecordingMailer::new());
        let handler = SendOtpHandler::new(Arc::new(InMemoryOtpStore::new()), mailer.clone(), 10);

        assert_eq!(handler.handle("nope").await, Err(OtpError::InvalidEmail));
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn delivery_failure_is_surfaced() {
        let handler = SendOtpHandler::new(
            Arc::new(InMemoryOtpStore::new()),
            Arc::new(RecordingMailer::failing()),
            10,
        );

        let err = handler.handle("a@x.com").await.unwrap_err();

        assert!(matches!(err, OtpError::Delivery(_)));
        assert!(!err.client_message().contains("connection refused"));
    }
}
