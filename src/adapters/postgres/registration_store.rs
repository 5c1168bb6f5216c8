//! PostgreSQL implementation of RegistrationStore.
//!
//! Reconciliation relies on the `registrations_email_key` and
//! `payments_razorpay_order_id_key` unique constraints: every write in a
//! unit of work is an `INSERT ... ON CONFLICT DO UPDATE` (or a guarded
//! `UPDATE`) inside one transaction, so racing callers converge on the
//! same rows instead of duplicating or failing.

use crate::domain::foundation::{DomainError, ErrorCode, PaymentId, RegistrationId, Timestamp};
use crate::domain::registration::validators::normalize_email;
use crate::domain::registration::{
    FailureOutcome, ParticipantProfile, PaymentConfirmation, PaymentFailure, PaymentRecord,
    PaymentStatus, Reconciled, Registration,
};
use crate::ports::RegistrationStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

/// PostgreSQL implementation of the RegistrationStore port.
pub struct PostgresRegistrationStore {
    pool: PgPool,
}

impl PostgresRegistrationStore {
    /// Creates a new PostgresRegistrationStore with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to begin transaction: {}", e)))
    }
}

const REGISTRATION_COLUMNS: &str = "id, full_name, email, phone, whatsapp_number, city, state, \
     business_name, business_type, experience_level, email_verified, payment_status, \
     razorpay_order_id, razorpay_payment_id, created_at, updated_at";

const PAYMENT_COLUMNS: &str = "id, registration_id, razorpay_order_id, razorpay_payment_id, \
     razorpay_signature, amount, currency, status, payment_method, created_at, updated_at";

/// Database row representation of a registration.
#[derive(Debug, sqlx::FromRow)]
struct RegistrationRow {
    id: i64,
    full_name: String,
    email: String,
    phone: String,
    whatsapp_number: Option<String>,
    city: Option<String>,
    state: Option<String>,
    business_name: Option<String>,
    business_type: Option<String>,
    experience_level: Option<String>,
    email_verified: bool,
    payment_status: String,
    razorpay_order_id: Option<String>,
    razorpay_payment_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Registration row plus whether the upsert inserted it.
#[derive(Debug, sqlx::FromRow)]
struct UpsertedRegistrationRow {
    #[sqlx(flatten)]
    registration: RegistrationRow,
    inserted: bool,
}

impl UpsertedRegistrationRow {
    fn into_parts(self) -> Result<(Registration, bool), DomainError> {
        Ok((self.registration.try_into()?, self.inserted))
    }
}

/// Database row representation of a payment.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRow {
    id: i64,
    registration_id: i64,
    razorpay_order_id: String,
    razorpay_payment_id: Option<String>,
    razorpay_signature: Option<String>,
    amount: i64,
    currency: String,
    status: String,
    payment_method: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct UpsertedPaymentRow {
    #[sqlx(flatten)]
    payment: PaymentRow,
    inserted: bool,
}

impl UpsertedPaymentRow {
    fn into_parts(self) -> Result<(PaymentRecord, bool), DomainError> {
        Ok((self.payment.try_into()?, self.inserted))
    }
}

impl TryFrom<RegistrationRow> for Registration {
    type Error = DomainError;

    fn try_from(row: RegistrationRow) -> Result<Self, Self::Error> {
        Ok(Registration {
            id: RegistrationId::from_i64(row.id),
            profile: ParticipantProfile {
                full_name: row.full_name,
                email: row.email,
                phone: row.phone,
                whatsapp_number: row.whatsapp_number,
                city: row.city,
                state: row.state,
                business_name: row.business_name,
                business_type: row.business_type,
                experience_level: row.experience_level,
            },
            email_verified: row.email_verified,
            payment_status: parse_status(&row.payment_status)?,
            razorpay_order_id: row.razorpay_order_id,
            razorpay_payment_id: row.razorpay_payment_id,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

impl TryFrom<PaymentRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(PaymentRecord {
            id: PaymentId::from_i64(row.id),
            registration_id: RegistrationId::from_i64(row.registration_id),
            razorpay_order_id: row.razorpay_order_id,
            razorpay_payment_id: row.razorpay_payment_id,
            razorpay_signature: row.razorpay_signature,
            amount: row.amount,
            currency: row.currency,
            status: parse_status(&row.status)?,
            payment_method: row.payment_method,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_status(s: &str) -> Result<PaymentStatus, DomainError> {
    s.parse()
        .map_err(|e: String| DomainError::new(ErrorCode::DatabaseError, e))
}

/// Maps a sqlx error, surfacing unique violations as `Conflict`.
fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return DomainError::new(
                ErrorCode::Conflict,
                format!("{}: {}", context, db_err.message()),
            );
        }
    }
    DomainError::database(format!("{}: {}", context, e))
}

// ════════════════════════════════════════════════════════════════════
// Statements shared by the units of work
// ════════════════════════════════════════════════════════════════════

/// Inserts the registration, or refreshes status and attempt references on
/// an existing email. Profile columns are never in the update set.
async fn upsert_registration_success(
    tx: &mut Transaction<'static, Postgres>,
    profile: &ParticipantProfile,
    confirmation: &PaymentConfirmation,
) -> Result<(Registration, bool), DomainError> {
    let sql = format!(
        r#"
        INSERT INTO registrations (
            full_name, email, phone, whatsapp_number, city, state,
            business_name, business_type, experience_level,
            email_verified, payment_status, razorpay_order_id, razorpay_payment_id
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE, 'success', $10, $11)
        ON CONFLICT (email) DO UPDATE SET
            payment_status = 'success',
            razorpay_order_id = EXCLUDED.razorpay_order_id,
            razorpay_payment_id = EXCLUDED.razorpay_payment_id,
            updated_at = NOW()
        RETURNING {}, (xmax = 0) AS inserted
        "#,
        REGISTRATION_COLUMNS
    );

    let upserted: UpsertedRegistrationRow = sqlx::query_as(&sql)
        .bind(&profile.full_name)
        .bind(&profile.email)
        .bind(&profile.phone)
        .bind(&profile.whatsapp_number)
        .bind(&profile.city)
        .bind(&profile.state)
        .bind(&profile.business_name)
        .bind(&profile.business_type)
        .bind(&profile.experience_level)
        .bind(&confirmation.order_id)
        .bind(&confirmation.payment_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to upsert registration", e))?;

    upserted.into_parts()
}

/// Marks an existing registration paid.
async fn mark_registration_success(
    tx: &mut Transaction<'static, Postgres>,
    registration_id: RegistrationId,
    confirmation: &PaymentConfirmation,
) -> Result<Registration, DomainError> {
    let sql = format!(
        r#"
        UPDATE registrations SET
            payment_status = 'success',
            razorpay_order_id = $2,
            razorpay_payment_id = $3,
            updated_at = NOW()
        WHERE id = $1
        RETURNING {}
        "#,
        REGISTRATION_COLUMNS
    );

    let row: RegistrationRow = sqlx::query_as(&sql)
        .bind(registration_id.as_i64())
        .bind(&confirmation.order_id)
        .bind(&confirmation.payment_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to update registration", e))?;

    row.try_into()
}

/// Inserts the payment already finalized, or finalizes the existing row
/// for the order. A missing signature or method keeps the stored one.
async fn upsert_payment_success(
    tx: &mut Transaction<'static, Postgres>,
    registration_id: RegistrationId,
    confirmation: &PaymentConfirmation,
) -> Result<(PaymentRecord, bool), DomainError> {
    let sql = format!(
        r#"
        INSERT INTO payments (
            registration_id, razorpay_order_id, razorpay_payment_id, razorpay_signature,
            amount, currency, status, payment_method
        ) VALUES ($1, $2, $3, $4, $5, $6, 'success', $7)
        ON CONFLICT (razorpay_order_id) DO UPDATE SET
            razorpay_payment_id = EXCLUDED.razorpay_payment_id,
            razorpay_signature = COALESCE(EXCLUDED.razorpay_signature, payments.razorpay_signature),
            status = 'success',
            payment_method = COALESCE(EXCLUDED.payment_method, payments.payment_method),
            updated_at = NOW()
        RETURNING {}, (xmax = 0) AS inserted
        "#,
        PAYMENT_COLUMNS
    );

    let upserted: UpsertedPaymentRow = sqlx::query_as(&sql)
        .bind(registration_id.as_i64())
        .bind(&confirmation.order_id)
        .bind(&confirmation.payment_id)
        .bind(&confirmation.signature)
        .bind(confirmation.amount)
        .bind(&confirmation.currency)
        .bind(&confirmation.method)
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to upsert payment", e))?;

    upserted.into_parts()
}

/// Locks and returns the registration owning `order_id`, else the one for
/// `email`.
async fn lock_registration(
    tx: &mut Transaction<'static, Postgres>,
    order_id: &str,
    email: Option<&str>,
) -> Result<Option<Registration>, DomainError> {
    let by_order: Option<RegistrationRow> = sqlx::query_as(
        r#"
        SELECT r.id, r.full_name, r.email, r.phone, r.whatsapp_number, r.city, r.state,
               r.business_name, r.business_type, r.experience_level, r.email_verified,
               r.payment_status, r.razorpay_order_id, r.razorpay_payment_id,
               r.created_at, r.updated_at
        FROM registrations r
        JOIN payments p ON p.registration_id = r.id
        WHERE p.razorpay_order_id = $1
        FOR UPDATE OF r
        "#,
    )
    .bind(order_id)
    .fetch_optional(&mut **tx)
    .await
    .map_err(|e| db_error("Failed to find registration by order", e))?;

    if let Some(row) = by_order {
        return Ok(Some(row.try_into()?));
    }

    let Some(email) = email else {
        return Ok(None);
    };

    let sql = format!(
        "SELECT {} FROM registrations WHERE email = $1 FOR UPDATE",
        REGISTRATION_COLUMNS
    );
    let by_email: Option<RegistrationRow> = sqlx::query_as(&sql)
        .bind(normalize_email(email))
        .fetch_optional(&mut **tx)
        .await
        .map_err(|e| db_error("Failed to find registration by email", e))?;

    by_email.map(Registration::try_from).transpose()
}

async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), DomainError> {
    tx.commit()
        .await
        .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))
}

#[async_trait]
impl RegistrationStore for PostgresRegistrationStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Registration>, DomainError> {
        let sql = format!(
            "SELECT {} FROM registrations WHERE email = $1",
            REGISTRATION_COLUMNS
        );
        let row: Option<RegistrationRow> = sqlx::query_as(&sql)
            .bind(normalize_email(email))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find registration", e))?;

        row.map(Registration::try_from).transpose()
    }

    async fn create(&self, profile: &ParticipantProfile) -> Result<Registration, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO registrations (
                full_name, email, phone, whatsapp_number, city, state,
                business_name, business_type, experience_level, email_verified
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE)
            RETURNING {}
            "#,
            REGISTRATION_COLUMNS
        );

        let row: RegistrationRow = sqlx::query_as(&sql)
            .bind(&profile.full_name)
            .bind(&profile.email)
            .bind(&profile.phone)
            .bind(&profile.whatsapp_number)
            .bind(&profile.city)
            .bind(&profile.state)
            .bind(&profile.business_name)
            .bind(&profile.business_type)
            .bind(&profile.experience_level)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create registration", e))?;

        row.try_into()
    }

    async fn update_payment_status(
        &self,
        email: &str,
        order_id: &str,
        payment_id: Option<&str>,
        status: PaymentStatus,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE registrations SET
                payment_status = $2,
                razorpay_order_id = $3,
                razorpay_payment_id = COALESCE($4, razorpay_payment_id),
                updated_at = NOW()
            WHERE email = $1
            "#,
        )
        .bind(normalize_email(email))
        .bind(status.as_str())
        .bind(order_id)
        .bind(payment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update registration status", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("No registration for {}", email),
            ));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Registration>, DomainError> {
        let sql = format!(
            "SELECT {} FROM registrations ORDER BY created_at DESC, id DESC",
            REGISTRATION_COLUMNS
        );
        let rows: Vec<RegistrationRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("Failed to list registrations", e))?;

        rows.into_iter().map(Registration::try_from).collect()
    }

    async fn find_payment_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        let sql = format!(
            "SELECT {} FROM payments WHERE razorpay_order_id = $1",
            PAYMENT_COLUMNS
        );
        let row: Option<PaymentRow> = sqlx::query_as(&sql)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to find payment", e))?;

        row.map(PaymentRecord::try_from).transpose()
    }

    async fn create_payment(
        &self,
        registration_id: RegistrationId,
        order_id: &str,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentRecord, DomainError> {
        let sql = format!(
            r#"
            INSERT INTO payments (registration_id, razorpay_order_id, amount, currency, status)
            VALUES ($1, $2, $3, $4, 'pending')
            RETURNING {}
            "#,
            PAYMENT_COLUMNS
        );
        let row: PaymentRow = sqlx::query_as(&sql)
            .bind(registration_id.as_i64())
            .bind(order_id)
            .bind(amount)
            .bind(currency)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("Failed to create payment", e))?;

        row.try_into()
    }

    async fn update_payment(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: Option<&str>,
        status: PaymentStatus,
        method: Option<&str>,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE payments SET
                razorpay_payment_id = $2,
                razorpay_signature = COALESCE($3, razorpay_signature),
                status = $4,
                payment_method = COALESCE($5, payment_method),
                updated_at = NOW()
            WHERE razorpay_order_id = $1
            "#,
        )
        .bind(order_id)
        .bind(payment_id)
        .bind(signature)
        .bind(status.as_str())
        .bind(method)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update payment", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::NotFound,
                format!("No payment for order {}", order_id),
            ));
        }
        Ok(())
    }

    async fn record_successful_payment(
        &self,
        profile: &ParticipantProfile,
        confirmation: &PaymentConfirmation,
    ) -> Result<Reconciled, DomainError> {
        let mut tx = self.begin().await?;

        let (registration, registration_created) =
            upsert_registration_success(&mut tx, profile, confirmation).await?;
        let (payment, payment_created) =
            upsert_payment_success(&mut tx, registration.id, confirmation).await?;

        commit(tx).await?;

        Ok(Reconciled {
            registration,
            payment,
            registration_created,
            payment_created,
        })
    }

    async fn record_captured_payment(
        &self,
        email: Option<&str>,
        confirmation: &PaymentConfirmation,
    ) -> Result<Option<Reconciled>, DomainError> {
        let mut tx = self.begin().await?;

        let Some(existing) = lock_registration(&mut tx, &confirmation.order_id, email).await?
        else {
            return Ok(None);
        };

        let registration = mark_registration_success(&mut tx, existing.id, confirmation).await?;
        let (payment, payment_created) =
            upsert_payment_success(&mut tx, registration.id, confirmation).await?;

        commit(tx).await?;

        Ok(Some(Reconciled {
            registration,
            payment,
            registration_created: false,
            payment_created,
        }))
    }

    async fn record_payment_failure(
        &self,
        failure: &PaymentFailure,
    ) -> Result<FailureOutcome, DomainError> {
        let mut tx = self.begin().await?;

        let Some(registration) =
            lock_registration(&mut tx, &failure.order_id, failure.email.as_deref()).await?
        else {
            return Ok(FailureOutcome::NotTracked);
        };

        // The WHERE on the conflict branch leaves a successful row untouched
        // and returns nothing.
        let payment_marked: Option<(i64,)> = sqlx::query_as(
            r#"
            INSERT INTO payments (
                registration_id, razorpay_order_id, razorpay_payment_id,
                amount, currency, status, payment_method
            ) VALUES ($1, $2, $3, $4, $5, 'failed', $6)
            ON CONFLICT (razorpay_order_id) DO UPDATE SET
                razorpay_payment_id = COALESCE(EXCLUDED.razorpay_payment_id, payments.razorpay_payment_id),
                status = 'failed',
                payment_method = COALESCE(EXCLUDED.payment_method, payments.payment_method),
                updated_at = NOW()
            WHERE payments.status <> 'success'
            RETURNING id
            "#,
        )
        .bind(registration.id.as_i64())
        .bind(&failure.order_id)
        .bind(&failure.payment_id)
        .bind(failure.amount)
        .bind(&failure.currency)
        .bind(&failure.method)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to record failed payment", e))?;

        if payment_marked.is_none() {
            commit(tx).await?;
            return Ok(FailureOutcome::AlreadySucceeded {
                registration_id: registration.id,
            });
        }

        let result = sqlx::query(
            r#"
            UPDATE registrations SET
                payment_status = 'failed',
                razorpay_order_id = $2,
                razorpay_payment_id = COALESCE($3, razorpay_payment_id),
                updated_at = NOW()
            WHERE id = $1 AND payment_status <> 'success'
            "#,
        )
        .bind(registration.id.as_i64())
        .bind(&failure.order_id)
        .bind(&failure.payment_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to mark registration failed", e))?;

        commit(tx).await?;

        if result.rows_affected() == 0 {
            Ok(FailureOutcome::AlreadySucceeded {
                registration_id: registration.id,
            })
        } else {
            Ok(FailureOutcome::Recorded {
                registration_id: registration.id,
            })
        }
    }
}
