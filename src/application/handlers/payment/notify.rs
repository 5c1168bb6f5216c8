//! Detached confirmation email dispatch.
//!
//! Runs after a reconciliation has committed. Failure is logged and never
//! reaches the caller: the stored payment state is authoritative.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::ports::{ConfirmationEmail, Mailer, SettingsStore};

#[derive(Clone)]
pub struct ConfirmationNotifier {
    mailer: Arc<dyn Mailer>,
    settings: Arc<dyn SettingsStore>,
}

impl ConfirmationNotifier {
    pub fn new(mailer: Arc<dyn Mailer>, settings: Arc<dyn SettingsStore>) -> Self {
        Self { mailer, settings }
    }

    /// Spawns the send and returns immediately.
    pub fn dispatch(
        &self,
        to: String,
        name: String,
        order_id: String,
        payment_id: String,
    ) -> JoinHandle<()> {
        let mailer = Arc::clone(&self.mailer);
        let settings = Arc::clone(&self.settings);

        tokio::spawn(async move {
            let settings = match settings.load().await {
                Ok(settings) => settings,
                Err(e) => {
                    tracing::warn!(error = %e, "Falling back to default webinar settings for confirmation");
                    Default::default()
                }
            };

            let email = ConfirmationEmail {
                to,
                name,
                order_id,
                payment_id,
                settings,
            };

            match mailer.send_confirmation(&email).await {
                Ok(()) => tracing::info!(
                    email = %email.to,
                    order_id = %email.order_id,
                    "Confirmation email sent"
                ),
                Err(e) => tracing::error!(
                    email = %email.to,
                    order_id = %email.order_id,
                    error = %e,
                    "Failed to send confirmation email"
                ),
            }
        })
    }
}
