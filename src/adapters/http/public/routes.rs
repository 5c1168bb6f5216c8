//! Routes reachable without an admin token.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    check_email, health, registration_status, send_otp, validate_contact, verify_otp,
    webinar_info,
};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `POST /check-email` - Paid registration lookup
/// - `POST /validate-contact` - Form field checks
/// - `POST /send-otp` - Email a verification code
/// - `POST /verify-otp` - Check a verification code
/// - `GET /webinar-info` - Public webinar details
/// - `GET /registration-status` - Whether registration is still open
/// - `GET /health` - Liveness probe
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/check-email", post(check_email))
        .route("/validate-contact", post(validate_contact))
        .route("/send-otp", post(send_otp))
        .route("/verify-otp", post(verify_otp))
        .route("/webinar-info", get(webinar_info))
        .route("/registration-status", get(registration_status))
        .route("/health", get(health))
}
