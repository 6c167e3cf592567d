use crate::dto::user_dto::{CreateUserRequest, UpdateUserRequest, UserQuery};
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::normalize_optional;
use bcrypt::{hash, DEFAULT_COST};
use chrono::Utc;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

pub struct UserController {
    repository: UserRepository,
}

/// bcrypt with the default cost
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST).map_err(|e| AppError::Hash(format!("Could not hash password: {}", e)))
}

impl UserController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: UserRepository::new(pool),
        }
    }

    pub async fn list(&self, query: &UserQuery) -> AppResult<Vec<User>> {
        self.repository.list(query.role).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<User> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("User", id))
    }

    pub async fn create(&self, request: CreateUserRequest) -> AppResult<User> {
        let email = request.email.unwrap_or_default().trim().to_lowercase();
        if self.repository.email_taken(&email, None).await? {
            return Err(AppError::Conflict(format!("Email {} is already registered", email)));
        }

        let password_hash = hash_password(&request.password.unwrap_or_default())?;
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: request.name.unwrap_or_default().trim().to_string(),
            email,
            password_hash,
            role: request.role.unwrap_or_default(),
            phone: normalize_optional(request.phone),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        };

        let saved = self.repository.create(&user).await?;
        info!("👤 User created: {} ({:?})", saved.email, saved.role);
        Ok(saved)
    }

    pub async fn update(&self, id: Uuid, request: UpdateUserRequest) -> AppResult<User> {
        let mut user = self.get(id).await?;

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if self.repository.email_taken(&email, Some(id)).await? {
                return Err(AppError::Conflict(format!("Email {} is already registered", email)));
            }
            user.email = email;
        }
        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if let Some(password) = request.password {
            user.password_hash = hash_password(&password)?;
        }
        if let Some(role) = request.role {
            user.role = role;
        }
        if request.phone.is_some() {
            user.phone = normalize_optional(request.phone);
        }

        self.repository.update(&user).await
    }

    /// Users who created jobs are kept
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.get(id).await?;

        let jobs = self.repository.count_jobs(id).await?;
        if jobs > 0 {
            warn!("Refusing to delete user {} with {} job(s)", id, jobs);
            return Err(AppError::BadRequest(format!(
                "User has {} associated job(s) and cannot be deleted",
                jobs
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(not_found_error("User", id));
        }
        info!("🗑️ User deleted: {}", id);
        Ok(())
    }
}
