//! Authentication adapters.
//!
//! - `admin_tokens` - HS256 capability tokens for the admin surface

mod admin_tokens;

pub use admin_tokens::JwtAdminTokens;
