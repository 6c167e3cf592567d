//! Bearer-token authentication
//!
//! `require_auth` rejects requests without a valid token; `optional_auth`
//! only attaches the user when a valid token is present. Both insert an
//! `AuthenticatedUser` into the request extensions.

use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use tracing::debug;
use uuid::Uuid;

use crate::models::user::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::{extract_token_from_header, verify_token, JwtConfig};

/// User injected by the auth middleware
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: UserRole,
}

fn authenticate(request: &Request, jwt: &JwtConfig) -> Result<AuthenticatedUser, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Authorization header required".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let claims = verify_token(token, jwt)?;
    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".to_string()))?;

    Ok(AuthenticatedUser {
        user_id,
        email: claims.email,
        role: claims.role,
    })
}

pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let user = authenticate(&request, &state.jwt_config())?;
    debug!("Authenticated {} ({})", user.email, user.user_id);
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Invalid or missing tokens are ignored
pub async fn optional_auth(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    if let Ok(user) = authenticate(&request, &state.jwt_config()) {
        request.extensions_mut().insert(user);
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::jwt::generate_token;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: "middleware-secret".to_string(),
            expiration: 3600,
        }
    }

    fn request_with(header_value: Option<&str>) -> Request {
        let mut builder = HttpRequest::builder().uri("/api/profile");
        if let Some(value) = header_value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_valid_bearer_token() {
        let id = Uuid::new_v4();
        let token = generate_token(id, "ops@example.com", UserRole::Staff, &jwt()).unwrap();
        let user = authenticate(&request_with(Some(&format!("Bearer {}", token))), &jwt()).unwrap();

        assert_eq!(user.user_id, id);
        assert_eq!(user.role, UserRole::Staff);
    }

    #[test]
    fn test_missing_or_malformed_header() {
        assert!(matches!(
            authenticate(&request_with(None), &jwt()),
            Err(AppError::Unauthorized(_))
        ));
        assert!(authenticate(&request_with(Some("Basic abc")), &jwt()).is_err());
        assert!(matches!(
            authenticate(&request_with(Some("Bearer not-a-jwt")), &jwt()),
            Err(AppError::Jwt(_))
        ));
    }
}
