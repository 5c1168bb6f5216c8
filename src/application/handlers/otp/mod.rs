//! OTP handlers.

mod send_otp;
mod verify_otp;

pub use send_otp::SendOtpHandler;
pub use verify_otp::VerifyOtpHandler;
