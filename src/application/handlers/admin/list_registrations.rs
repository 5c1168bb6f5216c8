//! ListRegistrationsHandler - All registrations, newest first.

use std::sync::Arc;

use crate::domain::registration::{Registration, RegistrationError};
use crate::ports::RegistrationStore;

pub struct ListRegistrationsHandler {
    registrations: Arc<dyn RegistrationStore>,
}

impl ListRegistrationsHandler {
    pub fn new(registrations: Arc<dyn RegistrationStore>) -> Self {
        Self { registrations }
    }

    pub async fn handle(&self) -> Result<Vec<Registration>, RegistrationError> {
        self.registrations.list_all().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list registrations");
            RegistrationError::from(e)
        })
    }
}
