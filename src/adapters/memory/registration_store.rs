//! In-Memory Registration Store
//!
//! Registrations and payments behind a single lock. Each unit of work
//! takes the write lock once, so concurrent reconciliations serialize and
//! converge the same way unique constraints make them converge in
//! PostgreSQL. Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, RegistrationId, Timestamp};
use crate::domain::registration::validators::normalize_email;
use crate::domain::registration::{
    FailureOutcome, ParticipantProfile, PaymentConfirmation, PaymentFailure, PaymentRecord,
    PaymentStatus, Reconciled, Registration,
};
use crate::ports::RegistrationStore;

#[derive(Debug, Default)]
struct Tables {
    registrations: HashMap<String, Registration>,
    payments: HashMap<String, PaymentRecord>,
    next_registration_id: i64,
    next_payment_id: i64,
}

impl Tables {
    fn registration_by_id(&self, id: RegistrationId) -> Option<&Registration> {
        self.registrations.values().find(|r| r.id == id)
    }

    fn insert_registration(&mut self, profile: &ParticipantProfile) -> Result<Registration, DomainError> {
        if self.registrations.contains_key(&profile.email) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Registration for {} already exists", profile.email),
            ));
        }
        self.next_registration_id += 1;
        let now = Timestamp::now();
        let registration = Registration {
            id: RegistrationId::from_i64(self.next_registration_id),
            profile: profile.clone(),
            email_verified: true,
            payment_status: PaymentStatus::Pending,
            razorpay_order_id: None,
            razorpay_payment_id: None,
            created_at: now,
            updated_at: now,
        };
        self.registrations
            .insert(profile.email.clone(), registration.clone());
        Ok(registration)
    }

    fn set_registration_status(
        &mut self,
        email: &str,
        order_id: &str,
        payment_id: Option<&str>,
        status: PaymentStatus,
    ) -> Result<Registration, DomainError> {
        let registration = self.registrations.get_mut(email).ok_or_else(|| {
            DomainError::new(ErrorCode::NotFound, format!("No registration for {}", email))
        })?;
        registration.payment_status = status;
        registration.razorpay_order_id = Some(order_id.to_string());
        if let Some(payment_id) = payment_id {
            registration.razorpay_payment_id = Some(payment_id.to_string());
        }
        registration.updated_at = Timestamp::now();
        Ok(registration.clone())
    }

    fn insert_payment(
        &mut self,
        registration_id: RegistrationId,
        order_id: &str,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentRecord, DomainError> {
        if self.payments.contains_key(order_id) {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                format!("Payment for order {} already exists", order_id),
            ));
        }
        if self.registration_by_id(registration_id).is_none() {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("Registration {} does not exist", registration_id),
            ));
        }
        self.next_payment_id += 1;
        let now = Timestamp::now();
        let payment = PaymentRecord {
            id: PaymentId::from_i64(self.next_payment_id),
            registration_id,
            razorpay_order_id: order_id.to_string(),
            razorpay_payment_id: None,
            razorpay_signature: None,
            amount,
            currency: currency.to_string(),
            status: PaymentStatus::Pending,
            payment_method: None,
            created_at: now,
            updated_at: now,
        };
        self.payments.insert(order_id.to_string(), payment.clone());
        Ok(payment)
    }

    fn finalize_payment(
        &mut self,
        order_id: &str,
        payment_id: Option<&str>,
        signature: Option<&str>,
        status: PaymentStatus,
        method: Option<&str>,
    ) -> Result<PaymentRecord, DomainError> {
        let payment = self.payments.get_mut(order_id).ok_or_else(|| {
            DomainError::new(ErrorCode::NotFound, format!("No payment for order {}", order_id))
        })?;
        if let Some(payment_id) = payment_id {
            payment.razorpay_payment_id = Some(payment_id.to_string());
        }
        if let Some(signature) = signature {
            payment.razorpay_signature = Some(signature.to_string());
        }
        if let Some(method) = method {
            payment.payment_method = Some(method.to_string());
        }
        payment.status = status;
        payment.updated_at = Timestamp::now();
        Ok(payment.clone())
    }

    /// Finalizes the payment as success and the registration likewise.
    fn reconcile(
        &mut self,
        registration: Registration,
        registration_created: bool,
        confirmation: &PaymentConfirmation,
    ) -> Result<Reconciled, DomainError> {
        let payment_created = !self.payments.contains_key(&confirmation.order_id);
        if payment_created {
            self.insert_payment(
                registration.id,
                &confirmation.order_id,
                confirmation.amount,
                &confirmation.currency,
            )?;
        }
        let payment = self.finalize_payment(
            &confirmation.order_id,
            Some(&confirmation.payment_id),
            confirmation.signature.as_deref(),
            PaymentStatus::Success,
            confirmation.method.as_deref(),
        )?;
        let registration = self.set_registration_status(
            registration.email(),
            &confirmation.order_id,
            Some(&confirmation.payment_id),
            PaymentStatus::Success,
        )?;

        Ok(Reconciled {
            registration,
            payment,
            registration_created,
            payment_created,
        })
    }
}

/// In-memory registration store
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistrationStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRegistrationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registration rows.
    pub async fn registration_count(&self) -> usize {
        self.tables.read().await.registrations.len()
    }

    /// Number of payment rows.
    pub async fn payment_count(&self) -> usize {
        self.tables.read().await.payments.len()
    }
}

#[async_trait]
impl RegistrationStore for InMemoryRegistrationStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, DomainError> {
        let tables = self.tables.read().await;
        Ok(tables.registrations.get(&normalize_email(email)).cloned())
    }

    async fn create(&self, profile: &ParticipantProfile) -> Result<Registration, DomainError> {
        self.tables.write().await.insert_registration(profile)
    }

    async fn update_payment_status(
        &self,
        email: &str,
        order_id: &str,
        payment_id: Option<&str>,
        status: PaymentStatus,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.set_registration_status(&normalize_email(email), order_id, payment_id, status)?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Registration>, DomainError> {
        let tables = self.tables.read().await;
        let mut all: Vec<Registration> = tables.registrations.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(all)
    }

    async fn find_payment_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self.tables.read().await.payments.get(order_id).cloned())
    }

    async fn create_payment(
        &self,
        registration_id: RegistrationId,
        order_id: &str,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentRecord, DomainError> {
        self.tables
            .write()
            .await
            .insert_payment(registration_id, order_id, amount, currency)
    }

    async fn update_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: Option<&str>,
        status: PaymentStatus,
        method: Option<&str>,
    ) -> Result<(), DomainError> {
        let mut tables = self.tables.write().await;
        tables.finalize_payment(order_id, Some(payment_id), signature, status, method)?;
        Ok(())
    }

    async fn record_successful_payment(
        &self,
        profile: &ParticipantProfile,
        confirmation: &PaymentConfirmation,
    ) -> Result<Reconciled, DomainError> {
        let mut tables = self.tables.write().await;

        let (registration, created) = match tables.registrations.get(&profile.email).cloned() {
            Some(existing) => (existing, false),
            None => (tables.insert_registration(profile)?, true),
        };

        tables.reconcile(registration, created, confirmation)
    }

    async fn record_captured_payment(
        &self,
        email: Option<&str>,
        confirmation: &PaymentConfirmation,
    ) -> Result<Option<Reconciled>, DomainError> {
        let mut tables = self.tables.write().await;

        let by_order = tables
            .payments
            .get(&confirmation.order_id)
            .and_then(|p| tables.registration_by_id(p.registration_id))
            .cloned();
        let registration = match by_order {
            Some(found) => Some(found),
            None => email.and_then(|e| tables.registrations.get(&normalize_email(e)).cloned()),
        };

        match registration {
            Some(registration) => tables.reconcile(registration, false, confirmation).map(Some),
            None => Ok(None),
        }
    }

    async fn record_payment_failure(
        &self,
        failure: &PaymentFailure,
    ) -> Result<FailureOutcome, DomainError> {
        let mut tables = self.tables.write().await;

        let by_order = tables
            .payments
            .get(&failure.order_id)
            .and_then(|p| tables.registration_by_id(p.registration_id))
            .cloned();
        let registration = match by_order {
            Some(found) => found,
            None => match failure
                .email
                .as_deref()
                .and_then(|e| tables.registrations.get(&normalize_email(e)).cloned())
            {
                Some(found) => found,
                None => return Ok(FailureOutcome::NotTracked),
            },
        };

        let payment_succeeded = tables
            .payments
            .get(&failure.order_id)
            .map(|p| p.status.is_success())
            .unwrap_or(false);
        if payment_succeeded {
            return Ok(FailureOutcome::AlreadySucceeded {
                registration_id: registration.id,
            });
        }

        if !tables.payments.contains_key(&failure.order_id) {
            tables.insert_payment(
                registration.id,
                &failure.order_id,
                failure.amount,
                &failure.currency,
            )?;
        }
        tables.finalize_payment(
            &failure.order_id,
            failure.payment_id.as_deref(),
            None,
            PaymentStatus::Failed,
            failure.method.as_deref(),
        )?;

        if registration.payment_status.can_transition_to(PaymentStatus::Failed) {
            tables.set_registration_status(
                registration.email(),
                &failure.order_id,
                failure.payment_id.as_deref(),
                PaymentStatus::Failed,
            )?;
            Ok(FailureOutcome::Recorded {
                registration_id: registration.id,
            })
        } else {
            Ok(FailureOutcome::AlreadySucceeded {
                registration_id: registration.id,
            })
        }
    }
}
