//! HTTP routing
//!
//! Every resource is mounted under `/api/<resource>` and answers both
//! `/:id` and `?id=`. Methods a path does not support get a JSON 405;
//! `OPTIONS` always answers 200. Stored avatars are served from `/uploads`.

pub mod auth_routes;
pub mod client_routes;
pub mod expense_routes;
pub mod health_routes;
pub mod invoice_routes;
pub mod job_routes;
pub mod profile_routes;
pub mod service_routes;
pub mod supplier_routes;
pub mod user_routes;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::json;
use tower_http::{compression::CompressionLayer, services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use crate::middleware::cors::cors_middleware;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/api/auth", auth_routes::create_auth_router())
        .nest("/api/profile", profile_routes::create_profile_router(state.clone()))
        .nest("/api/jobs", job_routes::create_job_router(state.clone()))
        .nest("/api/invoices", invoice_routes::create_invoice_router())
        .nest("/api/clients", client_routes::create_client_router())
        .nest("/api/expenses", expense_routes::create_expense_router())
        .nest("/api/suppliers", supplier_routes::create_supplier_router())
        .nest("/api/services", service_routes::create_service_router())
        .nest("/api/users", user_routes::create_user_router())
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_middleware())
        .with_state(state)
}

/// Method fallback shared by every route
pub async fn method_fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        return (StatusCode::OK, Json(json!({ "success": true }))).into_response();
    }
    AppError::MethodNotAllowed(method.to_string()).into_response()
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// `?id=` is mandatory for PUT and DELETE on the collection path
pub(crate) fn require_id(id: Option<Uuid>) -> Result<Uuid, AppError> {
    id.ok_or_else(|| AppError::BadRequest("id is required".to_string()))
}
