//! Test doubles shared by handler tests.

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::foundation::{DomainError, RegistrationId};
use crate::domain::otp::OtpCode;
use crate::domain::payment::{Order, OrderRequest};
use crate::domain::registration::{
    FailureOutcome, ParticipantProfile, PaymentConfirmation, PaymentFailure, PaymentRecord,
    PaymentStatus, Reconciled, Registration,
};
use crate::domain::webinar::{SettingsUpdate, WebinarSettings};
use crate::ports::{
    ConfirmationEmail, GatewayError, MailError, Mailer, OrderGateway, RegistrationStore,
    SettingsStore, WebinarLinkEmail,
};

pub const KEY_SECRET: &str = "test_key_secret";
pub const WEBHOOK_SECRET: &str = "test_webhook_secret";

// ════════════════════════════════════════════════════════════════════════════
// Mailer
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentMail {
    Confirmation(ConfirmationEmail),
    Otp { to: String, code: String },
    WebinarLink(WebinarLinkEmail),
}

/// Records every message; optionally fails for all or selected recipients.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    fail_all: bool,
    fail_for: Vec<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub fn failing_for(emails: &[&str]) -> Self {
        Self {
            fail_for: emails.iter().map(|e| e.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn confirmations(&self) -> Vec<ConfirmationEmail> {
        self.sent()
            .into_iter()
            .filter_map(|m| match m {
                SentMail::Confirmation(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    /// Most recent OTP emailed to `to`.
    pub fn last_otp_code(&self, to: &str) -> Option<String> {
        self.sent().into_iter().rev().find_map(|m| match m {
            SentMail::Otp { to: recipient, code } if recipient == to => Some(code),
            _ => None,
        })
    }

    /// Waits for detached sends to land.
    pub async fn wait_for(&self, count: usize) -> Vec<SentMail> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.sent()
    }

    fn record(&self, to: &str, mail: SentMail) -> Result<(), MailError> {
        if self.fail_all || self.fail_for.iter().any(|e| e == to) {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_confirmation(&self, email: &ConfirmationEmail) -> Result<(), MailError> {
        self.record(&email.to, SentMail::Confirmation(email.clone()))
    }

    async fn send_otp(
        &self,
        to: &str,
        code: &OtpCode,
        _expiry_minutes: i64,
    ) -> Result<(), MailError> {
        self.record(
            to,
            SentMail::Otp {
                to: to.to_string(),
                code: code.as_str().to_string(),
            },
        )
    }

    async fn send_webinar_link(&self, email: &WebinarLinkEmail) -> Result<(), MailError> {
        self.record(&email.to, SentMail::WebinarLink(email.clone()))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Order gateway
// ════════════════════════════════════════════════════════════════════════════

pub struct StubGateway {
    requests: Mutex<Vec<OrderRequest>>,
    failure: Option<GatewayError>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    pub fn failing(error: GatewayError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: Some(error),
        }
    }

    pub fn requests(&self) -> Vec<OrderRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderGateway for StubGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, GatewayError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        Ok(Order {
            id: format!("order_{}", requests.len()),
            amount: request.amount,
            currency: request.currency.clone(),
            receipt: Some(request.receipt.clone()),
            status: Some("created".to_string()),
            extra: serde_json::Map::new(),
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Failing stores
// ════════════════════════════════════════════════════════════════════════════

/// Raw text that must never reach a client.
pub const DB_FAILURE: &str = "connection to 10.0.0.5:5432 refused (user=webinar)";

fn db_failure() -> DomainError {
    DomainError::database(DB_FAILURE)
}

pub struct FailingRegistrationStore;

#[async_trait]
impl RegistrationStore for FailingRegistrationStore {
    async fn find_by_email(&self, _email: &str) -> Result<Option<Registration>, DomainError> {
        Err(db_failure())
    }

    async fn create(&self, _profile: &ParticipantProfile) -> Result<Registration, DomainError> {
        Err(db_failure())
    }

    async fn update_payment_status(
        &self,
        _email: &str,
        _order_id: &str,
        _payment_id: Option<&str>,
        _status: PaymentStatus,
    ) -> Result<(), DomainError> {
        Err(db_failure())
    }

    async fn list_all(&self) -> Result<Vec<Registration>, DomainError> {
        Err(db_failure())
    }

    async fn find_payment_by_order_id(
        &self,
        _order_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Err(db_failure())
    }

    async fn create_payment(
        &self,
        _registration_id: RegistrationId,
        _order_id: &str,
        _amount: i64,
        _currency: &str,
    ) -> Result<PaymentRecord, DomainError> {
        Err(db_failure())
    }

    async fn update_payment(
        &self,
        _order_id: &str,
        _payment_id: &str,
        _signature: Option<&str>,
        _status: PaymentStatus,
        _method: Option<&str>,
    ) -> Result<(), DomainError> {
        Err(db_failure())
    }

    async fn record_successful_payment(
        &self,
        _profile: &ParticipantProfile,
        _confirmation: &PaymentConfirmation,
    ) -> Result<Reconciled, DomainError> {
        Err(db_failure())
    }

    async fn record_captured_payment(
        &self,
        _email: Option<&str>,
        _confirmation: &PaymentConfirmation,
    ) -> Result<Option<Reconciled>, DomainError> {
        Err(db_failure())
    }

    async fn record_payment_failure(
        &self,
        _failure: &PaymentFailure,
    ) -> Result<FailureOutcome, DomainError> {
        Err(db_failure())
    }
}

pub struct FailingSettingsStore;

#[async_trait]
impl SettingsStore for FailingSettingsStore {
    async fn load(&self) -> Result<WebinarSettings, DomainError> {
        Err(db_failure())
    }

    async fn update(&self, _update: &SettingsUpdate) -> Result<WebinarSettings, DomainError> {
        Err(db_failure())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Fixtures
// ════════════════════════════════════════════════════════════════════════════

pub fn profile(email: &str) -> ParticipantProfile {
    ParticipantProfile::new("Asha Rao", email, "9876543210")
        .with_city(Some("Pune".to_string()))
        .with_business_type(Some("Boutique".to_string()))
}
