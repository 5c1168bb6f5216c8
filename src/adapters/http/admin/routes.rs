//! Routes for admin login and the token-guarded admin endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use super::handlers::{
    get_settings, list_registrations, login, send_webinar_links, update_settings, verify,
};
use crate::adapters::http::middleware::require_admin;
use crate::adapters::http::state::AppState;

/// Login and token check; no token required to reach them.
///
/// - `POST /login`
/// - `POST /verify`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/verify", post(verify))
}

/// Admin endpoints, every one behind `require_admin`.
///
/// - `GET /registrations`
/// - `POST /send-webinar-links`
/// - `GET|POST /webinar-settings`
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/registrations", get(list_registrations))
        .route("/send-webinar-links", post(send_webinar_links))
        .route("/webinar-settings", get(get_settings).post(update_settings))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}
