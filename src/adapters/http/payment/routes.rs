//! Routes for the checkout flow.

use axum::{routing::post, Router};

use super::handlers::{create_order, handle_webhook, verify_payment};
use crate::adapters::http::state::AppState;

/// # Routes
///
/// - `POST /create-order` - Open a provider order
/// - `POST /verify-payment` - Verify checkout callback and register
/// - `POST /webhook` - Provider webhook (no auth, signature verified)
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/verify-payment", post(verify_payment))
        .route("/webhook", post(handle_webhook))
}
