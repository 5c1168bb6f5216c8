//! Domain layer: pure types and rules, no I/O.

pub mod foundation;
pub mod otp;
pub mod payment;
pub mod registration;
pub mod webinar;
