//! Webinar Registration - OTP-verified signup with Razorpay payment reconciliation
//!
//! This crate collects participant details, verifies email ownership, and
//! turns provider-confirmed payments into exactly one registration per email
//! and exactly one payment row per order.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
