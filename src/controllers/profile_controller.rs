use std::path::PathBuf;

use crate::dto::profile_dto::{AvatarUploadRequest, UpdateProfileRequest};
use crate::models::user::User;
use crate::repositories::user_repository::UserRepository;
use crate::services::avatar_storage::{remove_avatar, store_avatar};
use crate::controllers::user_controller::hash_password;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::validation::normalize_optional;
use bcrypt::verify;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

pub struct ProfileController {
    repository: UserRepository,
    upload_dir: PathBuf,
}

impl ProfileController {
    pub fn new(pool: PgPool, upload_dir: PathBuf) -> Self {
        Self {
            repository: UserRepository::new(pool),
            upload_dir,
        }
    }

    /// The token may outlive the account
    pub async fn get(&self, user_id: Uuid) -> AppResult<User> {
        self.repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Account no longer exists".to_string()))
    }

    pub async fn update(&self, user_id: Uuid, request: UpdateProfileRequest) -> AppResult<User> {
        let mut user = self.get(user_id).await?;

        if let Some(new_password) = request.new_password {
            let current = request.current_password.ok_or_else(|| {
                AppError::BadRequest("currentPassword is required to change the password".to_string())
            })?;
            let valid = verify(&current, &user.password_hash)
                .map_err(|e| AppError::Hash(format!("Could not verify password: {}", e)))?;
            if !valid {
                return Err(AppError::Unauthorized("Current password is incorrect".to_string()));
            }
            user.password_hash = hash_password(&new_password)?;
            info!("🔑 Password changed for {}", user.email);
        }

        if let Some(email) = request.email {
            let email = email.trim().to_lowercase();
            if self.repository.email_taken(&email, Some(user_id)).await? {
                return Err(AppError::Conflict(format!("Email {} is already registered", email)));
            }
            user.email = email;
        }
        if let Some(name) = request.name {
            user.name = name.trim().to_string();
        }
        if request.phone.is_some() {
            user.phone = normalize_optional(request.phone);
        }

        self.repository.update(&user).await
    }

    pub async fn upload_avatar(&self, user_id: Uuid, request: AvatarUploadRequest) -> AppResult<User> {
        let mut user = self.get(user_id).await?;
        let payload = request
            .avatar
            .ok_or_else(|| AppError::BadRequest("avatar is required".to_string()))?;

        let previous = user.avatar_url.take();
        user.avatar_url = Some(store_avatar(&self.upload_dir, user_id, &payload).await?);
        let user = self.repository.update(&user).await?;

        if let Some(previous) = previous.filter(|url| Some(url) != user.avatar_url.as_ref()) {
            if let Err(e) = remove_avatar(&self.upload_dir, &previous).await {
                warn!("Could not remove old avatar {}: {}", previous, e);
            }
        }
        Ok(user)
    }
}
