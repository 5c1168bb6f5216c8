//! SMTP mailer over lettre's async transport (STARTTLS, port from config).

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::templates::{self, RenderedEmail};
use crate::config::EmailConfig;
use crate::domain::otp::OtpCode;
use crate::ports::{ConfirmationEmail, MailError, Mailer, WebinarLinkEmail};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// Builds the transport. Fails when credentials are missing or the
    /// sender address does not parse.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        if !config.smtp_ready() {
            return Err(MailError::NotConfigured);
        }

        let credentials =
            Credentials::new(config.smtp_username.clone(), config.smtp_password.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| MailError::Transport(format!("SMTP starttls error: {}", e)))?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        let from = config
            .from_header()
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(format!("Invalid from address: {}", e)))?;

        Ok(Self { transport, from })
    }

    async fn deliver(&self, to: &str, rendered: RenderedEmail) -> Result<(), MailError> {
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidAddress(format!("Invalid to address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(recipient)
            .subject(rendered.subject)
            .header(ContentType::TEXT_HTML)
            .body(rendered.html)
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        tracing::debug!(email = %to, "Email delivered");
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send_confirmation(&self, email: &ConfirmationEmail) -> Result<(), MailError> {
        self.deliver(&email.to, templates::confirmation(email)).await
    }

    async fn send_otp(
        &self,
        to: &str,
        code: &OtpCode,
        expiry_minutes: i64,
    ) -> Result<(), MailError> {
        self.deliver(to, templates::otp(code.as_str(), expiry_minutes))
            .await
    }

    async fn send_webinar_link(&self, email: &WebinarLinkEmail) -> Result<(), MailError> {
        self.deliver(&email.to, templates::webinar_link(email)).await
    }
}
