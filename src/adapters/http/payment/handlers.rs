//! HTTP handlers for order creation, payment verification, and webhooks.

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::{CreateOrderCommand, VerifyPaymentCommand};
use crate::domain::payment::{UnverifiedWebhook, SIGNATURE_HEADER};

use super::dto::{CreateOrderRequest, VerifyPaymentRequest, VerifyPaymentResponse, WebhookAck};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

/// POST /create-order - Open a provider order for the checkout page
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_order_handler();
    let cmd = CreateOrderCommand {
        amount: request.amount,
        currency: request.currency,
        receipt: request.receipt,
        notes: request.notes,
        email: request.email,
    };

    let order = handler.handle(cmd).await?;
    Ok(Json(order))
}

/// POST /verify-payment - Verify the checkout callback and record the registration
pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.verify_payment_handler();
    let amount = request.user_data.amount_minor();
    let cmd = VerifyPaymentCommand {
        order_id: request.razorpay_order_id,
        payment_id: request.razorpay_payment_id,
        signature: request.razorpay_signature,
        profile: request.user_data.into_profile(),
        amount,
        currency: state.options.default_currency.clone(),
    };

    let result = handler.handle(cmd).await?;
    Ok(Json(VerifyPaymentResponse::from(result)))
}

/// POST /webhook - Handle Razorpay webhook deliveries
///
/// The raw body is passed through untouched; the signature covers its bytes.
pub async fn handle_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let handler = state.webhook_handler();
    let outcome = handler
        .handle(UnverifiedWebhook::new(body.to_vec(), signature))
        .await?;
    tracing::debug!(outcome = ?outcome, "Webhook handled");

    Ok((StatusCode::OK, Json(WebhookAck { received: true })))
}
