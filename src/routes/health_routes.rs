use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::database::ping;
use crate::routes::method_fallback;
use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health).fallback(method_fallback))
}

/// Always 200; the database state is reported in the body
async fn health(State(state): State<AppState>) -> Json<Value> {
    let database = match ping(&state.pool).await {
        Ok(()) => "connected",
        Err(_) => "unavailable",
    };

    Json(json!({
        "status": "ok",
        "database": database,
        "environment": state.config.environment,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
