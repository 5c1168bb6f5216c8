//! CreateOrderHandler - Command handler for opening a provider order.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::domain::payment::{Order, OrderRequest};
use crate::domain::registration::validators::normalize_email;
use crate::domain::registration::RegistrationError;
use crate::ports::{OrderGateway, RegistrationStore};

/// Command to create an order.
#[derive(Debug, Clone, Default)]
pub struct CreateOrderCommand {
    /// Minor units.
    pub amount: i64,
    pub currency: Option<String>,
    pub receipt: Option<String>,
    pub notes: Option<Map<String, Value>>,
    /// Participant email; falls back to `notes.email`.
    pub email: Option<String>,
}

/// Handler for order creation.
///
/// Rejects the request before contacting the provider when the email
/// already holds a paid registration.
pub struct CreateOrderHandler {
    registrations: Arc<dyn RegistrationStore>,
    gateway: Arc<dyn OrderGateway>,
    default_currency: String,
}

impl CreateOrderHandler {
    pub fn new(
        registrations: Arc<dyn RegistrationStore>,
        gateway: Arc<dyn OrderGateway>,
        default_currency: impl Into<String>,
    ) -> Self {
        Self {
            registrations,
            gateway,
            default_currency: default_currency.into(),
        }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<Order, RegistrationError> {
        let currency = cmd.currency.or_else(|| Some(self.default_currency.clone()));
        let request = OrderRequest::new(cmd.amount, currency, cmd.receipt, cmd.notes)?;

        let email = cmd
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|e| !e.is_empty())
            .or_else(|| request.notes_email());

        if let Some(email) = email {
            let existing = self.registrations.find_by_email(&email).await.map_err(|e| {
                tracing::error!(email = %email, error = %e, "Registration lookup failed");
                RegistrationError::from(e)
            })?;

            if existing.map_or(false, |r| r.is_paid()) {
                tracing::info!(email = %email, "Order rejected: email already registered");
                return Err(RegistrationError::AlreadyRegistered { email });
            }
        }

        let order = self.gateway.create_order(&request).await.map_err(|e| {
            tracing::error!(error = %e, amount = request.amount, "Order creation failed");
            RegistrationError::from(e)
        })?;

        tracing::info!(
            order_id = %order.id,
            amount = order.amount,
            receipt = %request.receipt,
            "Order created"
        );

        Ok(order)
    }
}
