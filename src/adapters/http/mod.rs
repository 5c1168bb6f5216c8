//! HTTP adapters - REST API implementations.
//!
//! Each area has its own module with DTOs, handlers, and routes; the
//! router mounts them all at the root.

pub mod admin;
pub mod error;
pub mod middleware;
pub mod payment;
pub mod public;
pub mod router;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use middleware::ADMIN_TOKEN_HEADER;
pub use router::{api_router, app_router};
pub use state::{AppOptions, AppState};
