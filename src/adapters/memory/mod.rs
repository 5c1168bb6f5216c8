//! In-memory adapters for tests and database-less local runs.

mod otp_store;
mod registration_store;
mod settings_store;

pub use otp_store::InMemoryOtpStore;
pub use registration_store::InMemoryRegistrationStore;
pub use settings_store::InMemorySettingsStore;
