//! Shared fixtures for the HTTP integration tests.
//!
//! Every test drives the real router against the in-memory stores; only
//! the payment provider and the mail transport are replaced.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use webinar_registration::adapters::http::{api_router, AppOptions, AppState};
use webinar_registration::adapters::{
    InMemoryOtpStore, InMemoryRegistrationStore, InMemorySettingsStore, JwtAdminTokens,
};
use webinar_registration::domain::otp::OtpCode;
use webinar_registration::domain::payment::signature::compute_signature;
use webinar_registration::domain::payment::{Order, OrderRequest, SignatureVerifier};
use webinar_registration::ports::{
    ConfirmationEmail, GatewayError, MailError, Mailer, OrderGateway, RegistrationStore,
    WebinarLinkEmail,
};

pub const KEY_SECRET: &str = "integration_key_secret";
pub const WEBHOOK_SECRET: &str = "integration_webhook_secret";
pub const ADMIN_PASSWORD: &str = "integration-admin";
pub const TOKEN_SECRET: &str = "integration-token-secret-0123456789";

// =============================================================================
// Test Doubles
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Confirmation { to: String, order_id: String },
    Otp { to: String, code: String },
    Link { to: String },
}

/// Records every message; optionally fails every send.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Sent>>,
    fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn confirmations(&self) -> usize {
        self.sent()
            .iter()
            .filter(|m| matches!(m, Sent::Confirmation { .. }))
            .count()
    }

    pub fn otp_for(&self, to: &str) -> Option<String> {
        self.sent().into_iter().rev().find_map(|m| match m {
            Sent::Otp { to: recipient, code } if recipient == to => Some(code),
            _ => None,
        })
    }

    /// Confirmation sends are detached; give them a moment to land.
    pub async fn settle(&self) {
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    fn record(&self, mail: Sent) -> Result<(), MailError> {
        if self.fail {
            return Err(MailError::Transport("connection refused".to_string()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_confirmation(&self, email: &ConfirmationEmail) -> Result<(), MailError> {
        self.record(Sent::Confirmation {
            to: email.to.clone(),
            order_id: email.order_id.clone(),
        })
    }

    async fn send_otp(
        &self,
        to: &str,
        code: &OtpCode,
        _expiry_minutes: i64,
    ) -> Result<(), MailError> {
        self.record(Sent::Otp {
            to: to.to_string(),
            code: code.as_str().to_string(),
        })
    }

    async fn send_webinar_link(&self, email: &WebinarLinkEmail) -> Result<(), MailError> {
        self.record(Sent::Link {
            to: email.to.clone(),
        })
    }
}

/// Hands out `order_1`, `order_2`, ... and remembers each request.
#[derive(Default)]
pub struct StubGateway {
    requests: Mutex<Vec<OrderRequest>>,
}

impl StubGateway {
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl OrderGateway for StubGateway {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, GatewayError> {
        let mut requests = self.requests.lock().unwrap();
        requests.push(request.clone());
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

// =============================================================================
// Application Harness
// =============================================================================

pub struct TestApp {
    pub state: AppState,
    pub registrations: Arc<InMemoryRegistrationStore>,
    pub gateway: Arc<StubGateway>,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_mailer(RecordingMailer::default())
    }

    pub fn with_mailer(mailer: RecordingMailer) -> Self {
        Self::build(Arc::new(InMemoryRegistrationStore::new()), mailer, None)
    }

    /// Uses `store` for registrations instead of the in-memory one the
    /// harness keeps a handle to.
    pub fn with_store(store: Arc<dyn RegistrationStore>) -> Self {
        Self::build(
            Arc::new(InMemoryRegistrationStore::new()),
            RecordingMailer::default(),
            Some(store),
        )
    }

    fn build(
        registrations: Arc<InMemoryRegistrationStore>,
        mailer: RecordingMailer,
        store_override: Option<Arc<dyn RegistrationStore>>,
    ) -> Self {
        let gateway = Arc::new(StubGateway::default());
        let mailer = Arc::new(mailer);
        let store: Arc<dyn RegistrationStore> =
            store_override.unwrap_or_else(|| registrations.clone());

        let state = AppState {
            registrations: store,
            settings: Arc::new(InMemorySettingsStore::new()),
            otp_store: Arc::new(InMemoryOtpStore::new()),
            gateway: gateway.clone(),
            mailer: mailer.clone(),
            admin_tokens: Arc::new(JwtAdminTokens::new(TOKEN_SECRET, 60)),
            verifier: SignatureVerifier::new(KEY_SECRET, WEBHOOK_SECRET)
                .expect("test secrets are non-empty"),
            options: Arc::new(AppOptions {
                admin_password: SecretString::new(ADMIN_PASSWORD.to_string()),
                ..AppOptions::default()
            }),
        };

        Self {
            state,
            registrations,
            gateway,
            mailer,
        }
    }

    pub fn router(&self) -> Router {
        api_router(self.state.clone())
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(post_json(uri, body)).await
    }

    pub async fn webhook(&self, payload: &str, signature: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/webhook")
            .header("content-type", "application/json")
            .header("X-Razorpay-Signature", signature)
            .body(Body::from(payload.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn admin_token(&self) -> String {
        let (status, body) = self
            .post(
                "/auth/login",
                json!({ "username": "admin", "password": ADMIN_PASSWORD }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().unwrap().to_string()
    }
}

// =============================================================================
// Request Builders
// =============================================================================

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn payment_signature(order_id: &str, payment_id: &str) -> String {
    compute_signature(
        KEY_SECRET.as_bytes(),
        format!("{}|{}", order_id, payment_id).as_bytes(),
    )
}

pub fn webhook_signature(payload: &str) -> String {
    compute_signature(WEBHOOK_SECRET.as_bytes(), payload.as_bytes())
}

pub fn verify_body(order_id: &str, payment_id: &str, email: &str, first_name: &str) -> Value {
    json!({
        "razorpay_order_id": order_id,
        "razorpay_payment_id": payment_id,
        "razorpay_signature": payment_signature(order_id, payment_id),
        "userData": {
            "firstName": first_name,
            "lastName": "Rao",
            "email": email,
            "phone": "9876543210",
            "whatsapp": "9876543210",
            "city": "Pune",
            "category": "Boutique",
            "experience": "Beginner",
            "amount": 100
        }
    })
}

pub fn payment_event(event: &str, order_id: &str, payment_id: &str, email: &str) -> String {
    let status = if event == "payment.failed" { "failed" } else { "captured" };
    json!({
        "entity": "event",
        "event": event,
        "payload": {
            "payment": {
                "entity": {
                    "id": payment_id,
                    "order_id": order_id,
                    "amount": 100,
                    "currency": "INR",
                    "status": status,
                    "method": "upi",
                    "email": email,
                    "contact": "+919876543210",
                    "notes": {}
                }
            }
        }
    })
    .to_string()
}
