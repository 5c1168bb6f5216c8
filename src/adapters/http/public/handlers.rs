//! HTTP handlers for contact checks, OTP, and public webinar info.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::domain::registration::validators::{contact_errors, is_valid_email, normalize_email};
use crate::domain::registration::RegistrationError;

use super::dto::{
    CheckEmailResponse, ContactErrorsResponse, EmailRequest, HealthResponse, MessageResponse,
    RegistrationStatusResponse, ValidateContactRequest, VerifyOtpRequest, WebinarInfoResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

/// POST /check-email - Whether the email already holds a paid registration
pub async fn check_email(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = normalize_email(&request.email);
    if !is_valid_email(&email) {
        return Err(RegistrationError::validation("email", "Invalid email address").into());
    }

    let existing = state
        .registrations
        .find_by_email(&email)
        .await
        .map_err(RegistrationError::from)?;

    Ok(Json(CheckEmailResponse {
        success: true,
        exists: existing.map_or(false, |r| r.is_paid()),
    }))
}

/// POST /validate-contact - Per-field format checks for the registration form
pub async fn validate_contact(Json(request): Json<ValidateContactRequest>) -> Response {
    let errors = contact_errors(
        request.email.as_deref(),
        request.phone.as_deref(),
        request.whatsapp.as_deref(),
    );

    if errors.is_empty() {
        Json(MessageResponse::ok("Contact details validated successfully")).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(ContactErrorsResponse {
                success: false,
                errors,
            }),
        )
            .into_response()
    }
}

/// POST /send-otp - Email a fresh verification code
pub async fn send_otp(
    State(state): State<AppState>,
    Json(request): Json<EmailRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.send_otp_handler().handle(&request.email).await?;
    Ok(Json(MessageResponse::ok("OTP sent to your email")))
}

/// POST /verify-otp - Check a submitted verification code
pub async fn verify_otp(
    State(state): State<AppState>,
    Json(request): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .verify_otp_handler()
        .handle(&request.email, &request.otp)
        .await?;
    Ok(Json(MessageResponse::ok("Email verified successfully")))
}

/// GET /webinar-info - Date, time, and title
pub async fn webinar_info(State(state): State<AppState>) -> impl IntoResponse {
    let settings = state.settings_handler().public().await;
    Json(WebinarInfoResponse::from(settings))
}

/// GET /registration-status - Closed from the webinar date onward
pub async fn registration_status(State(state): State<AppState>) -> impl IntoResponse {
    let today = chrono::Local::now().date_naive();
    let open = state.settings_handler().registration_open(today).await;
    Json(RegistrationStatusResponse::new(open))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
