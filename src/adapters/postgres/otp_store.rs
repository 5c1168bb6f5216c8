//! PostgreSQL implementation of OtpStore.

use crate::domain::foundation::{DomainError, Timestamp};
use crate::domain::otp::{OtpCode, OtpRecord};
use crate::ports::OtpStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

pub struct PostgresOtpStore {
    pool: PgPool,
}

impl PostgresOtpStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OtpRow {
    email: String,
    otp: String,
    expires_at: DateTime<Utc>,
    attempts: i32,
}

impl From<OtpRow> for OtpRecord {
    fn from(row: OtpRow) -> Self {
        OtpRecord {
            email: row.email,
            code: OtpCode::from_stored(row.otp),
            expires_at: Timestamp::from_datetime(row.expires_at),
            attempts: row.attempts.max(0) as u32,
        }
    }
}

#[async_trait]
impl OtpStore for PostgresOtpStore {
    async fn replace(&self, record: &OtpRecord) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO otp_verifications (email, otp, expires_at, attempts)
            VALUES ($1, $2, $3, 0)
            ON CONFLICT (email) DO UPDATE SET
                otp = EXCLUDED.otp,
                expires_at = EXCLUDED.expires_at,
                attempts = 0,
                created_at = NOW()
            "#,
        )
        .bind(&record.email)
        .bind(record.code.as_str())
        .bind(record.expires_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to store OTP: {}", e)))?;

        Ok(())
    }

    async fn find(&self, email: &str) -> Result<Option<OtpRecord>, DomainError> {
        let row: Option<OtpRow> = sqlx::query_as(
            "SELECT email, otp, expires_at, attempts FROM otp_verifications WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load OTP: {}", e)))?;

        Ok(row.map(OtpRecord::from))
    }

    async fn increment_attempts(&self, email: &str) -> Result<(), DomainError> {
        sqlx::query("UPDATE otp_verifications SET attempts = attempts + 1 WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to count OTP attempt: {}", e)))?;

        Ok(())
    }

    async fn delete(&self, email: &str) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM otp_verifications WHERE email = $1")
            .bind(email)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete OTP: {}", e)))?;

        Ok(())
    }
}
