//! Error handling
//!
//! Every failure a handler can produce and its conversion into a JSON HTTP
//! response. Each body carries `error`, `message`, `code` and `timestamp`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Application errors
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),


    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("JWT error: {0}")]
    Jwt(String),

    #[error("Hash error: {0}")]
    Hash(String),
}

/// Error body returned by the API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
    timestamp: String,
}

impl ErrorResponse {
    fn new(error: &str, message: String, details: Option<serde_json::Value>, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details,
            code: code.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(sqlx::Error::RowNotFound) => StatusCode::NOT_FOUND,
            AppError::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                StatusCode::CONFLICT
            }
            AppError::Database(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                StatusCode::BAD_REQUEST
            }
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) | AppError::Jwt(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Internal(_) | AppError::Hash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Database(e) => match status {
                StatusCode::NOT_FOUND => {
                    warn!("Row not found: {}", e);
                    ErrorResponse::new("Not Found", "The requested record does not exist".to_string(), None, "NOT_FOUND")
                }
                StatusCode::CONFLICT => {
                    warn!("Unique constraint violated: {}", e);
                    ErrorResponse::new(
                        "Conflict",
                        "A record with the same unique value already exists".to_string(),
                        Some(json!({ "sql_error": e.to_string() })),
                        "CONFLICT",
                    )
                }
                StatusCode::BAD_REQUEST => {
                    warn!("Foreign key violated: {}", e);
                    ErrorResponse::new(
                        "Bad Request",
                        "The record references missing data or is still referenced".to_string(),
                        Some(json!({ "sql_error": e.to_string() })),
                        "BAD_REQUEST",
                    )
                }
                _ => {
                    error!("Database error: {}", e);
                    ErrorResponse::new(
                        "Database Error",
                        "An error occurred while accessing the database".to_string(),
                        Some(json!({ "sql_error": e.to_string() })),
                        "DB_ERROR",
                    )
                }
            },

            AppError::Validation(e) => {
                warn!("Validation error: {}", e);
                ErrorResponse::new(
                    "Validation Error",
                    "The provided data is invalid".to_string(),
                    Some(json!(e)),
                    "VALIDATION_ERROR",
                )
            }

            AppError::Unauthorized(msg) => {
                warn!("Unauthorized access: {}", msg);
                ErrorResponse::new("Unauthorized", msg, None, "UNAUTHORIZED")
            }

            AppError::NotFound(msg) => {
                warn!("Resource not found: {}", msg);
                ErrorResponse::new("Not Found", msg, None, "NOT_FOUND")
            }

            AppError::Conflict(msg) => {
                warn!("Conflict: {}", msg);
                ErrorResponse::new("Conflict", msg, None, "CONFLICT")
            }

            AppError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                ErrorResponse::new("Bad Request", msg, None, "BAD_REQUEST")
            }

            AppError::MethodNotAllowed(method) => {
                warn!("Method not allowed: {}", method);
                ErrorResponse::new(
                    "Method Not Allowed",
                    format!("Method {} is not allowed on this resource", method),
                    None,
                    "METHOD_NOT_ALLOWED",
                )
            }

            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    Some(json!({ "internal_error": msg })),
                    "INTERNAL_ERROR",
                )
            }

            AppError::Jwt(msg) => {
                warn!("JWT error: {}", msg);
                ErrorResponse::new("JWT Error", msg, None, "JWT_ERROR")
            }

            AppError::Hash(msg) => {
                error!("Hash error: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "An error occurred while processing credentials".to_string(),
                    Some(json!({ "hash_error": msg })),
                    "INTERNAL_ERROR",
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result alias used by controllers and repositories
pub type AppResult<T> = Result<T, AppError>;

/// Validation error for a single field, same shape as derive-generated ones
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    use validator::ValidationError;

    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());

    let mut errors = validator::ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

pub fn internal_error(message: &str) -> AppError {
    AppError::Internal(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_body() {
        let (status, body) = body_json(not_found_error("Job", "42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NOT_FOUND");
        assert_eq!(body["message"], "Job with id '42' not found");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_internal_error_keeps_original_text() {
        let (status, body) = body_json(internal_error("disk on fire")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "An unexpected error occurred");
        assert_eq!(body["details"]["internal_error"], "disk on fire");
    }

    #[tokio::test]
    async fn test_validation_error_is_bad_request() {
        let (status, body) = body_json(validation_error("total", "total is required")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["details"]["total"].is_array());
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let error = AppError::Database(sqlx::Error::RowNotFound);
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_method_not_allowed_status() {
        let error = AppError::MethodNotAllowed("PATCH".to_string());
        assert_eq!(error.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
