//! HTTP middleware: bearer authentication and CORS

pub mod auth;
pub mod cors;

pub use auth::{optional_auth, require_auth, AuthenticatedUser};
pub use cors::cors_middleware;
