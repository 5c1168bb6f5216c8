//! Outbound email adapters.

mod log_mailer;
mod smtp_mailer;
pub mod templates;

pub use log_mailer::LogMailer;
pub use smtp_mailer::SmtpMailer;
