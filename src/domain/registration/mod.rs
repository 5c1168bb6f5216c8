//! Registration domain - participants, payment attempts, and their states.

mod errors;
mod profile;
mod reconciliation;
mod registration;
mod status;
pub mod validators;

pub use errors::RegistrationError;
pub use profile::ParticipantProfile;
pub use reconciliation::{FailureOutcome, PaymentConfirmation, PaymentFailure, Reconciled};
pub use registration::{PaymentRecord, Registration};
pub use status::PaymentStatus;
