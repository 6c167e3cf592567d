use crate::dto::auth_dto::{LoginRequest, LoginResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::jwt::{generate_token, JwtConfig};
use bcrypt::verify;
use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::{info, warn};

pub struct AuthController {
    repository: UserRepository,
    jwt: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt,
        }
    }

    /// Same 401 for an unknown email and a wrong password
    pub async fn login(&self, request: LoginRequest) -> AppResult<LoginResponse> {
        let email = request.email.unwrap_or_default().trim().to_lowercase();
        let password = request.password.unwrap_or_default();

        let Some(user) = self.repository.find_by_email(&email).await? else {
            warn!("Login failed for unknown email {}", email);
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        };

        let valid = verify(&password, &user.password_hash)
            .map_err(|e| AppError::Hash(format!("Could not verify password: {}", e)))?;
        if !valid {
            warn!("Login failed for {}", email);
            return Err(AppError::Unauthorized("Invalid email or password".to_string()));
        }

        let token = generate_token(user.id, &user.email, user.role, &self.jwt)?;
        let expires_at = Utc::now() + Duration::seconds(self.jwt.expiration as i64);

        info!("🔐 {} logged in", user.email);
        Ok(LoginResponse {
            success: true,
            user,
            token,
            expires_at,
        })
    }
}
