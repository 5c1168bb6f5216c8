//! Razorpay order client.
//!
//! Implements the `OrderGateway` port against `POST /v1/orders`.
//!
//! # Security
//!
//! - HTTP Basic auth from key id and key secret
//! - Secret held as `secrecy::SecretString`
//! - Every request bounded by the configured timeout

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use crate::config::PaymentConfig;
use crate::domain::payment::{Order, OrderRequest};
use crate::ports::{GatewayError, OrderGateway};

/// Razorpay API credentials and endpoint.
#[derive(Clone)]
pub struct RazorpayConfig {
    key_id: String,
    key_secret: SecretString,
    api_base_url: String,
    timeout: Duration,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com".to_string(),
            timeout: Duration::from_secs(15),
        }
    }

    /// Builds the client configuration from the payment section.
    pub fn from_app_config(config: &PaymentConfig) -> Self {
        Self::new(&config.razorpay_key_id, &config.razorpay_key_secret)
            .with_base_url(&config.api_base_url)
            .with_timeout(config.request_timeout())
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for RazorpayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayConfig")
            .field("key_id", &self.key_id)
            .field("api_base_url", &self.api_base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Razorpay error body: `{"error": {"code": ..., "description": ...}}`.
#[derive(Debug, Deserialize)]
struct RazorpayErrorBody {
    error: RazorpayErrorDetail,
}

#[derive(Debug, Deserialize)]
struct RazorpayErrorDetail {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Razorpay order gateway.
pub struct RazorpayOrderClient {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayOrderClient {
    /// Creates a client whose requests time out after `config.timeout`.
    pub fn new(config: RazorpayConfig) -> Result<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl OrderGateway for RazorpayOrderClient {
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, GatewayError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(&self.config.key_id, Some(self.config.key_secret.expose_secret()))
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, timeout = e.is_timeout(), "Razorpay create_order request failed");
                GatewayError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<RazorpayErrorBody>(&body)
                .ok()
                .map(|b| b.error);
            let description = detail
                .as_ref()
                .and_then(|d| d.description.clone())
                .unwrap_or_else(|| format!("Razorpay returned HTTP {}", status.as_u16()));

            tracing::error!(
                status = status.as_u16(),
                description = %description,
                "Razorpay create_order rejected"
            );

            return Err(GatewayError::Provider {
                status: status.as_u16(),
                code: detail.and_then(|d| d.code),
                description,
            });
        }

        let order: Order = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("Failed to parse Razorpay order: {}", e)))?;

        tracing::info!(
            order_id = %order.id,
            amount = order.amount,
            currency = %order.currency,
            "Razorpay order created"
        );

        Ok(order)
    }
}
