//! Error to response mapping shared by all routes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::otp::OtpError;
use crate::domain::registration::RegistrationError;
use crate::ports::AdminAuthError;

/// Body of every failed request.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error: code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    Registration(RegistrationError),
    Otp(OtpError),
    Admin(AdminAuthError),
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        ApiError::Registration(err)
    }
}

impl From<OtpError> for ApiError {
    fn from(err: OtpError) -> Self {
        ApiError::Otp(err)
    }
}

impl From<AdminAuthError> for ApiError {
    fn from(err: AdminAuthError) -> Self {
        ApiError::Admin(err)
    }
}

impl ApiError {
    fn parts(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Registration(err) => {
                let body = ErrorResponse::new(err.error_code(), err.client_message());
                let body = match err {
                    RegistrationError::Validation { field, .. } if !field.is_empty() => {
                        body.with_details(json!({ "field": field }))
                    }
                    RegistrationError::Gateway { description } => {
                        body.with_details(Value::String(description.clone()))
                    }
                    _ => body,
                };
                (err.status_code(), body)
            }
            ApiError::Otp(err) => (
                err.status_code(),
                ErrorResponse::new(err.error_code(), err.client_message()),
            ),
            ApiError::Admin(err) => admin_parts(err),
        }
    }
}

fn admin_parts(err: &AdminAuthError) -> (StatusCode, ErrorResponse) {
    match err {
        AdminAuthError::InvalidCredentials => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new("INVALID_CREDENTIALS", "Invalid credentials"),
        ),
        AdminAuthError::Expired => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new("TOKEN_EXPIRED", "Invalid or expired token"),
        ),
        AdminAuthError::MissingToken | AdminAuthError::InvalidToken => (
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new("UNAUTHORIZED", "Unauthorized access"),
        ),
        AdminAuthError::Signing(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new("INTERNAL_ERROR", "Login failed. Please try again."),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.parts();
        if status.is_server_error() {
            let detail = match &self {
                ApiError::Registration(e) => e.to_string(),
                ApiError::Otp(e) => e.to_string(),
                ApiError::Admin(e) => e.to_string(),
            };
            tracing::error!(status = %status, code = %body.error, error = %detail, "Request failed");
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn persistence_failure_is_redacted() {
        let (status, body) = render(
            RegistrationError::Persistence("relation \"payments\" does not exist".to_string())
                .into(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "INTERNAL_ERROR");
        assert!(!body.to_string().contains("relation"));
    }

    #[tokio::test]
    async fn gateway_description_is_passed_through() {
        let (status, body) = render(
            RegistrationError::Gateway {
                description: "The amount must be at least INR 1.00".to_string(),
            }
            .into(),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Failed to create order");
        assert_eq!(body["details"], "The amount must be at least INR 1.00");
    }

    #[tokio::test]
    async fn validation_names_the_field() {
        let (status, body) =
            render(RegistrationError::validation("email", "Invalid email address").into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email address");
        assert_eq!(body["details"]["field"], "email");
    }

    #[tokio::test]
    async fn otp_mismatch_reports_remaining_attempts() {
        let (status, body) = render(OtpError::Mismatch { remaining: 1 }.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid OTP. 1 attempts remaining.");
    }

    #[tokio::test]
    async fn admin_failures_are_unauthorized() {
        let (status, body) = render(AdminAuthError::Expired.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "TOKEN_EXPIRED");

        let (status, _) = render(AdminAuthError::InvalidCredentials.into()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
