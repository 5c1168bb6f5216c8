//! Integration tests for email verification and the admin surface.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use common::{post_json, verify_body, RecordingMailer, Sent, TestApp};

// =============================================================================
// OTP
// =============================================================================

#[tokio::test]
async fn otp_is_sent_and_verified_once() {
    let app = TestApp::new();

    let (status, body) = app.post("/send-otp", json!({ "email": "a@x.com" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "OTP sent to your email");

    let code = app.mailer.otp_for("a@x.com").unwrap();
    assert_eq!(code.len(), 6);

    let (status, _) = app
        .post("/verify-otp", json!({ "email": "a@x.com", "otp": code }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post("/verify-otp", json!({ "email": "a@x.com", "otp": code }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "OTP_EXPIRED");
}

#[tokio::test]
async fn third_wrong_code_exhausts_the_otp() {
    let app = TestApp::new();
    app.post("/send-otp", json!({ "email": "a@x.com" })).await;
    let code = app.mailer.otp_for("a@x.com").unwrap();
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let (_, first) = app
        .post("/verify-otp", json!({ "email": "a@x.com", "otp": wrong }))
        .await;
    assert_eq!(first["message"], "Invalid OTP. 2 attempts remaining.");

    let (_, second) = app
        .post("/verify-otp", json!({ "email": "a@x.com", "otp": wrong }))
        .await;
    assert_eq!(second["message"], "Invalid OTP. 1 attempts remaining.");

    let (_, third) = app
        .post("/verify-otp", json!({ "email": "a@x.com", "otp": wrong }))
        .await;
    assert_eq!(third["error"], "OTP_MISMATCH");
    assert_eq!(third["message"], "Invalid OTP. 0 attempts remaining.");

    let (status, after) = app
        .post("/verify-otp", json!({ "email": "a@x.com", "otp": code }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(after["error"], "OTP_ATTEMPTS_EXHAUSTED");
}

#[tokio::test]
async fn invalid_email_gets_no_otp() {
    let app = TestApp::new();

    let (status, body) = app.post("/send-otp", json!({ "email": "not-an-email" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email address");
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn otp_delivery_failure_is_surfaced() {
    let app = TestApp::with_mailer(RecordingMailer::failing());

    let (status, body) = app.post("/send-otp", json!({ "email": "a@x.com" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "OTP_DELIVERY_FAILED");
    assert!(!body.to_string().contains("connection refused"));
}

// =============================================================================
// Admin
// =============================================================================

fn with_token(request: axum::http::request::Builder, token: &str) -> axum::http::request::Builder {
    request.header("X-Admin-Token", token)
}

#[tokio::test]
async fn admin_endpoints_reject_missing_and_forged_tokens() {
    let app = TestApp::new();

    let (status, _) = app
        .send(
            Request::builder()
                .uri("/admin/registrations")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .send(
            with_token(Request::builder().uri("/admin/webinar-settings"), "forged")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = TestApp::new();

    let (status, body) = app
        .post("/auth/login", json!({ "username": "admin", "password": "" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Username and password are required");
}

#[tokio::test]
async fn issued_token_passes_verification() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let (status, body) = app
        .send(
            with_token(Request::builder().method("POST").uri("/auth/verify"), &token)
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Token is valid");
}

#[tokio::test]
async fn admin_broadcasts_link_to_paid_participants() {
    let app = TestApp::new();
    app.post("/verify-payment", verify_body("order_1", "pay_1", "a@x.com", "Asha"))
        .await;
    app.post("/verify-payment", verify_body("order_2", "pay_2", "b@x.com", "Bina"))
        .await;
    let token = app.admin_token().await;

    let mut request = post_json(
        "/admin/send-webinar-links",
        json!({ "zoom_link": "https://zoom.us/j/123", "webinar_date": "December 10, 2025" }),
    );
    request
        .headers_mut()
        .insert("X-Admin-Token", token.parse().unwrap());
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["sent"], 2);
    assert_eq!(body["failed"], 0);
    let links = app
        .mailer
        .sent()
        .into_iter()
        .filter(|m| matches!(m, Sent::Link { .. }))
        .count();
    assert_eq!(links, 2);
}

#[tokio::test]
async fn broadcast_requires_zoom_link() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let mut request = post_json("/admin/send-webinar-links", json!({ "zoom_link": "  " }));
    request
        .headers_mut()
        .insert("X-Admin-Token", token.parse().unwrap());
    let (status, body) = app.send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn settings_update_is_reflected_publicly_without_zoom_link() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let mut request = post_json(
        "/admin/webinar-settings",
        json!({ "webinar_title": "Spring Cohort", "zoom_link": "https://zoom.us/j/9" }),
    );
    request
        .headers_mut()
        .insert("X-Admin-Token", token.parse().unwrap());
    let (status, _) = app.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let (status, info) = app
        .send(Request::builder().uri("/webinar-info").body(Body::empty()).unwrap())
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(info["webinar_title"], "Spring Cohort");
    assert_eq!(info["webinar_date"], "December 10, 2025");
    assert!(!info.to_string().contains("zoom.us"));
}

#[tokio::test]
async fn registration_closes_once_webinar_date_passes() {
    let app = TestApp::new();
    let token = app.admin_token().await;

    let mut request = post_json(
        "/admin/webinar-settings",
        json!({ "webinar_date": "2020-01-01" }),
    );
    request
        .headers_mut()
        .insert("X-Admin-Token", token.parse().unwrap());
    app.send(request).await;

    let (_, status) = app
        .send(
            Request::builder()
                .uri("/registration-status")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(status["registration_open"], false);
}
