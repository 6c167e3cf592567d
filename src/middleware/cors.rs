//! CORS
//!
//! The back office is served from a different origin, so every origin,
//! method and header is allowed.

use tower_http::cors::CorsLayer;

pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
