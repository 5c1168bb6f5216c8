//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and the error type that form the
//! vocabulary shared by every other domain module.

mod errors;
mod ids;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{PaymentId, RegistrationId};
pub use timestamp::Timestamp;
