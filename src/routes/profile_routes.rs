use axum::{
    extract::State,
    middleware::from_fn_with_state,
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;

use crate::controllers::profile_controller::ProfileController;
use crate::dto::common_dto::{mutation_response, DataResponse};
use crate::dto::profile_dto::{AvatarUploadRequest, UpdateProfileRequest};
use crate::middleware::auth::{require_auth, AuthenticatedUser};
use crate::models::User;
use crate::routes::method_fallback;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::ValidatedJson;

/// GET reads, PUT updates, POST uploads the avatar. Requires a bearer token.
pub fn create_profile_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(get_profile)
                .put(update_profile)
                .post(upload_avatar)
                .fallback(method_fallback),
        )
        .route_layer(from_fn_with_state(state, require_auth))
}

fn controller(state: &AppState) -> ProfileController {
    ProfileController::new(state.pool.clone(), state.config.upload_dir.clone())
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<DataResponse<User>>, AppError> {
    let profile = controller(&state).get(user.user_id).await?;
    Ok(Json(DataResponse::new(profile)))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<Value>, AppError> {
    let profile = controller(&state).update(user.user_id, request).await?;
    Ok(mutation_response("Profile updated successfully", "user", profile))
}

async fn upload_avatar(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<AvatarUploadRequest>,
) -> Result<Json<Value>, AppError> {
    let profile = controller(&state).upload_avatar(user.user_id, request).await?;
    Ok(mutation_response("Avatar uploaded successfully", "user", profile))
}
