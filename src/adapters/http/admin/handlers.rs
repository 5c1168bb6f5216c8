//! HTTP handlers for admin login and the guarded admin endpoints.

use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::domain::registration::RegistrationError;
use crate::domain::webinar::SettingsUpdate;

use super::dto::{
    LoginRequest, LoginResponse, RegistrationsResponse, SendWebinarLinksRequest,
    SendWebinarLinksResponse, SettingsResponse,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::ADMIN_TOKEN_HEADER;
use crate::adapters::http::public::dto::MessageResponse;
use crate::adapters::http::state::AppState;

/// POST /auth/login - Exchange credentials for an admin token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let username = request.username.trim().to_string();
    if username.is_empty() || request.password.trim().is_empty() {
        return Err(
            RegistrationError::validation("username", "Username and password are required").into(),
        );
    }

    let issued = state
        .admin_login_handler()
        .login(&username, &request.password)?;
    Ok(Json(LoginResponse::new(issued, username)))
}

/// POST /auth/verify - Check the token in `X-Admin-Token`
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let token = headers
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    state.admin_login_handler().verify(token)?;
    Ok(Json(MessageResponse::ok("Token is valid")))
}

/// GET /admin/registrations - Every registration, newest first
pub async fn list_registrations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let registrations = state.list_registrations_handler().handle().await?;
    Ok(Json(RegistrationsResponse {
        success: true,
        total: registrations.len(),
        registrations,
    }))
}

/// POST /admin/send-webinar-links - Email the joining link to every paid registration
pub async fn send_webinar_links(
    State(state): State<AppState>,
    Json(request): Json<SendWebinarLinksRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state
        .send_webinar_links_handler()
        .handle(request.into())
        .await?;
    Ok(Json(SendWebinarLinksResponse::from(result)))
}

/// GET /admin/webinar-settings
pub async fn get_settings(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let settings = state.settings_handler().get().await?;
    Ok(Json(SettingsResponse {
        success: true,
        message: None,
        settings,
    }))
}

/// POST /admin/webinar-settings - Partial update
pub async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<SettingsUpdate>,
) -> Result<impl IntoResponse, ApiError> {
    let settings = state.settings_handler().update(update).await?;
    Ok(Json(SettingsResponse {
        success: true,
        message: Some("Webinar settings updated successfully".to_string()),
        settings,
    }))
}
