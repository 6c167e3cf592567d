use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::user_controller::UserController;
use crate::dto::common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
use crate::dto::user_dto::{CreateUserRequest, UserQuery, UpdateUserRequest};
use crate::models::User;
use crate::routes::{method_fallback, require_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_users)
                .post(create_user)
                .put(update_user_by_query)
                .delete(delete_user_by_query)
                .fallback(method_fallback),
        )
        .route(
            "/:id",
            get(get_user)
                .put(update_user)
                .delete(delete_user)
                .fallback(method_fallback),
        )
}

fn controller(state: &AppState) -> UserController {
    UserController::new(state.pool.clone())
}

/// Optionally filtered by `?role=`
async fn list_users(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<UserQuery>,
) -> Result<Response, AppError> {
    let controller = controller(&state);
    if let Some(id) = query.id {
        let user = controller.get(id).await?;
        return Ok(Json(DataResponse::new(user)).into_response());
    }
    let users = controller.list(&query).await?;
    Ok(Json(ListResponse::new(users)).into_response())
}

async fn get_user(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<User>>, AppError> {
    Ok(Json(DataResponse::new(controller(&state).get(id).await?)))
}

async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let user = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("User created successfully", "user", user),
    ))
}

async fn update_user(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Value>, AppError> {
    let user = controller(&state).update(id, request).await?;
    Ok(mutation_response("User updated successfully", "user", user))
}

async fn update_user_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: ValidatedJson<UpdateUserRequest>,
) -> Result<Json<Value>, AppError> {
    update_user(state, PathId(require_id(query.id)?), body).await
}

async fn delete_user(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(delete_response("User deleted successfully"))
}

async fn delete_user_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_user(state, PathId(require_id(query.id)?)).await
}
