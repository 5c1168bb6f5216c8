//! PostgreSQL adapters.

mod otp_store;
mod registration_store;
mod settings_store;

pub use otp_store::PostgresOtpStore;
pub use registration_store::PostgresRegistrationStore;
pub use settings_store::PostgresSettingsStore;
