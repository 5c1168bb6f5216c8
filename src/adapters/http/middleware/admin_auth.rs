//! Admin capability check for axum.
//!
//! ```text
//! Request → require_admin → injects AdminClaims into extensions
//!                                  ↓
//!                           Admin handler
//! ```
//!
//! A request without a valid `X-Admin-Token` never reaches the handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::state::AppState;

/// Header carrying the admin capability token.
pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Rejects the request with 401 unless it carries a valid admin token.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok());

    match state.admin_login_handler().verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            tracing::warn!(path = %request.uri().path(), error = %e, "Admin request rejected");
            ApiError::from(e).into_response()
        }
    }
}
