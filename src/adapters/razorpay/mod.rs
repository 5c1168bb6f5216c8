//! Razorpay payment provider adapter.

mod order_client;

pub use order_client::{RazorpayConfig, RazorpayOrderClient};
