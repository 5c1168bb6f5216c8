//! Order gateway port.
//!
//! Creates payment orders with the external provider. One call is one
//! outbound request; implementations apply a bounded timeout.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::payment::{Order, OrderRequest};
use crate::domain::registration::RegistrationError;

#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Creates an order for `request.amount` minor units.
    async fn create_order(&self, request: &OrderRequest) -> Result<Order, GatewayError>;
}

/// Failures talking to the payment provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider answered with a non-2xx status.
    #[error("Provider rejected request ({status}): {description}")]
    Provider {
        status: u16,
        code: Option<String>,
        description: String,
    },

    /// The request never completed (connect failure, timeout, reset).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A 2xx response whose body was not an order.
    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Transport(_) => true,
            GatewayError::Provider { status, .. } => *status == 429 || *status >= 500,
            GatewayError::Decode(_) => false,
        }
    }
}

impl From<GatewayError> for RegistrationError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Provider { description, .. } => RegistrationError::Gateway { description },
            GatewayError::Decode(detail) => RegistrationError::Gateway {
                description: detail,
            },
            GatewayError::Transport(detail) => RegistrationError::Transport(detail),
        }
    }
}
