//! Top-level router: every route plus the cross-cutting tower layers.

use std::time::Duration;

use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::admin::{admin_routes, auth_routes};
use super::payment::payment_routes;
use super::public::public_routes;
use super::state::AppState;
use crate::config::ServerConfig;

/// All routes, mounted at the root as the checkout page expects.
///
/// No tower layers are applied, so tests can drive it directly.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(payment_routes())
        .merge(public_routes())
        .nest("/auth", auth_routes())
        .nest("/admin", admin_routes(state.clone()))
        .with_state(state)
}

/// The full application: [`api_router`] wrapped in request id, tracing,
/// timeout, compression, and CORS layers.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&server.cors_origins_list()));

    api_router(state).layer(middleware)
}

/// Any origin when none are configured; otherwise exactly the listed ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-admin-token"),
            HeaderName::from_static("x-razorpay-signature"),
        ])
        .max_age(Duration::from_secs(3600));

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    if allowed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(AllowOrigin::list(allowed))
    }
}
