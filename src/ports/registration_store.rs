//! Registration store port.
//!
//! Persistence for registrations and their payment attempts.
//!
//! # Atomicity
//!
//! The single-row operations are each atomic on their own. The
//! `record_*` operations are units of work: every row they touch is
//! written in one transaction, so no reader ever sees a registration
//! without its payment or a payment half-finalized.
//!
//! # Concurrency
//!
//! Implementations must converge when two units of work race on the same
//! email or order id: one registration row per email, one payment row per
//! order id, whichever caller wins.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RegistrationId};
use crate::domain::registration::{
    FailureOutcome, ParticipantProfile, PaymentConfirmation, PaymentFailure, PaymentRecord,
    PaymentStatus, Reconciled, Registration,
};

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Looks up a registration by (normalized) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, DomainError>;

    /// Inserts a new registration with `email_verified = true` and status
    /// `pending`.
    ///
    /// # Errors
    ///
    /// `Conflict` if the email is already registered.
    async fn create(&self, profile: &ParticipantProfile) -> Result<Registration, DomainError>;

    /// Refreshes status and attempt references. Profile fields are untouched.
    ///
    /// # Errors
    ///
    /// `NotFound` if no registration exists for the email.
    async fn update_payment_status(
        &self,
        email: &str,
        order_id: &str,
        payment_id: Option<&str>,
        status: PaymentStatus,
    ) -> Result<(), DomainError>;

    /// All registrations, newest first.
    async fn list_all(&self) -> Result<Vec<Registration>, DomainError>;

    async fn find_payment_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError>;

    /// Inserts a `pending` payment row for an order.
    ///
    /// # Errors
    ///
    /// `Conflict` if the order id is already recorded.
    async fn create_payment(
        &self,
        registration_id: RegistrationId,
        order_id: &str,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentRecord, DomainError>;

    /// Finalizes a payment row. A `None` signature or method keeps the
    /// stored value.
    ///
    /// # Errors
    ///
    /// `NotFound` if the order id is unknown.
    async fn update_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: Option<&str>,
        status: PaymentStatus,
        method: Option<&str>,
    ) -> Result<(), DomainError>;

    /// Records a confirmed payment for a participant, as one unit of work.
    ///
    /// - Registration: reused if the email exists (status, order id, and
    ///   payment id refreshed, profile kept), otherwise created from
    ///   `profile`.
    /// - Payment: finalized in place if the order id exists, otherwise
    ///   created and finalized.
    async fn record_successful_payment(
        &self,
        profile: &ParticipantProfile,
        confirmation: &PaymentConfirmation,
    ) -> Result<Reconciled, DomainError>;

    /// Records a confirmed payment when no participant profile is at hand.
    ///
    /// The registration is resolved from the order id's payment row, then
    /// from `email`. Returns `None` (and writes nothing) when neither
    /// resolves.
    async fn record_captured_payment(
        &self,
        email: Option<&str>,
        confirmation: &PaymentConfirmation,
    ) -> Result<Option<Reconciled>, DomainError>;

    /// Marks a payment and its registration `failed`, as one unit of work.
    ///
    /// Rows already at `success` are left alone.
    async fn record_payment_failure(
        &self,
        failure: &PaymentFailure,
    ) -> Result<FailureOutcome, DomainError>;
}
