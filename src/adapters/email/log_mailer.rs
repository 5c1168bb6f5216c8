//! Mailer that only logs. Used when SMTP is disabled or unconfigured.

use async_trait::async_trait;

use super::templates;
use crate::domain::otp::OtpCode;
use crate::ports::{ConfirmationEmail, MailError, Mailer, WebinarLinkEmail};

#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_confirmation(&self, email: &ConfirmationEmail) -> Result<(), MailError> {
        let rendered = templates::confirmation(email);
        tracing::info!(
            email = %email.to,
            order_id = %email.order_id,
            payment_id = %email.payment_id,
            subject = %rendered.subject,
            "[LOG MAILER] Confirmation email"
        );
        Ok(())
    }

    async fn send_otp(
        &self,
        to: &str,
        code: &OtpCode,
        expiry_minutes: i64,
    ) -> Result<(), MailError> {
        // Code is logged so local runs can complete verification.
        tracing::info!(
            email = %to,
            code = %code.as_str(),
            expiry_minutes,
            "[LOG MAILER] OTP email"
        );
        Ok(())
    }

    async fn send_webinar_link(&self, email: &WebinarLinkEmail) -> Result<(), MailError> {
        let rendered = templates::webinar_link(email);
        tracing::info!(
            email = %email.to,
            zoom_link = %email.zoom_link,
            subject = %rendered.subject,
            "[LOG MAILER] Webinar link email"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_send_succeeds() {
        let mailer = LogMailer::new();
        assert!(mailer
            .send_otp("a@x.com", &OtpCode::from_stored("123456"), 10)
            .await
            .is_ok());
    }
}
