//! Shared application state for every HTTP route.

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::application::handlers::{
    AdminLoginHandler, ConfirmationNotifier, CreateOrderHandler, HandleWebhookHandler,
    ListRegistrationsHandler, SendOtpHandler, SendWebinarLinksHandler, VerifyOtpHandler,
    VerifyPaymentHandler, WebinarSettingsHandler,
};
use crate::config::AppConfig;
use crate::domain::payment::{SignatureVerifier, DEFAULT_CURRENCY};
use crate::ports::{
    AdminTokens, Mailer, OrderGateway, OtpStore, RegistrationStore, SettingsStore,
};

/// Per-deployment knobs the handlers need beyond their ports.
#[derive(Debug, Clone)]
pub struct AppOptions {
    pub default_currency: String,
    pub otp_expiry_minutes: i64,
    pub otp_max_attempts: u32,
    pub admin_username: String,
    pub admin_password: SecretString,
    pub link_send_delay: Duration,
}

impl AppOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_currency: config.payment.currency.clone(),
            otp_expiry_minutes: config.otp.expiry_minutes,
            otp_max_attempts: config.otp.max_attempts,
            admin_username: config.admin.username.clone(),
            admin_password: SecretString::new(config.admin.password.clone()),
            link_send_delay: config.admin.link_send_delay(),
        }
    }
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            otp_expiry_minutes: 10,
            otp_max_attempts: 3,
            admin_username: "admin".to_string(),
            admin_password: SecretString::new(String::new()),
            link_send_delay: Duration::ZERO,
        }
    }
}

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every dependency is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub registrations: Arc<dyn RegistrationStore>,
    pub settings: Arc<dyn SettingsStore>,
    pub otp_store: Arc<dyn OtpStore>,
    pub gateway: Arc<dyn OrderGateway>,
    pub mailer: Arc<dyn Mailer>,
    pub admin_tokens: Arc<dyn AdminTokens>,
    pub verifier: SignatureVerifier,
    pub options: Arc<AppOptions>,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.registrations.clone(),
            self.gateway.clone(),
            self.options.default_currency.clone(),
        )
    }

    pub fn verify_payment_handler(&self) -> VerifyPaymentHandler {
        VerifyPaymentHandler::new(
            self.verifier.clone(),
            self.registrations.clone(),
            self.notifier(),
        )
    }

    pub fn webhook_handler(&self) -> HandleWebhookHandler {
        HandleWebhookHandler::new(
            self.verifier.clone(),
            self.registrations.clone(),
            self.notifier(),
        )
    }

    pub fn send_otp_handler(&self) -> SendOtpHandler {
        SendOtpHandler::new(
            self.otp_store.clone(),
            self.mailer.clone(),
            self.options.otp_expiry_minutes,
        )
    }

    pub fn verify_otp_handler(&self) -> VerifyOtpHandler {
        VerifyOtpHandler::new(self.otp_store.clone(), self.options.otp_max_attempts)
    }

    pub fn admin_login_handler(&self) -> AdminLoginHandler {
        AdminLoginHandler::new(
            self.options.admin_username.clone(),
            self.options.admin_password.expose_secret().clone(),
            self.admin_tokens.clone(),
        )
    }

    pub fn list_registrations_handler(&self) -> ListRegistrationsHandler {
        ListRegistrationsHandler::new(self.registrations.clone())
    }

    pub fn send_webinar_links_handler(&self) -> SendWebinarLinksHandler {
        SendWebinarLinksHandler::new(
            self.registrations.clone(),
            self.settings.clone(),
            self.mailer.clone(),
            self.options.link_send_delay,
        )
    }

    pub fn settings_handler(&self) -> WebinarSettingsHandler {
        WebinarSettingsHandler::new(self.settings.clone())
    }

    fn notifier(&self) -> ConfirmationNotifier {
        ConfirmationNotifier::new(self.mailer.clone(), self.settings.clone())
    }
}
