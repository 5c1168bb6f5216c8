//! OTP domain - six-digit email verification codes with bounded attempts.

mod code;
mod errors;

pub use code::{OtpCode, OtpRecord, OtpVerdict, OTP_LENGTH};
pub use errors::OtpError;
