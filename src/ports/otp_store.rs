//! OTP store port - at most one active code per email.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::otp::OtpRecord;

#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Stores `record`, replacing any previous code for the same email.
    async fn replace(&self, record: &OtpRecord) -> Result<(), DomainError>;

    async fn find(&self, email: &str) -> Result<Option<OtpRecord>, DomainError>;

    async fn increment_attempts(&self, email: &str) -> Result<(), DomainError>;

    async fn delete(&self, email: &str) -> Result<(), DomainError>;
}
