use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::client_controller::ClientController;
use crate::dto::common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
use crate::dto::client_dto::{CreateClientRequest, ClientQuery, UpdateClientRequest};
use crate::models::Client;
use crate::routes::{method_fallback, require_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_client_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_clients)
                .post(create_client)
                .put(update_client_by_query)
                .delete(delete_client_by_query)
                .fallback(method_fallback),
        )
        .route(
            "/:id",
            get(get_client)
                .put(update_client)
                .delete(delete_client)
                .fallback(method_fallback),
        )
}

fn controller(state: &AppState) -> ClientController {
    ClientController::new(state.pool.clone())
}

/// With `?id=` returns a single client
async fn list_clients(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ClientQuery>,
) -> Result<Response, AppError> {
    let controller = controller(&state);
    if let Some(id) = query.id {
        let client = controller.get(id).await?;
        return Ok(Json(DataResponse::new(client)).into_response());
    }
    let clients = controller.list(&query).await?;
    Ok(Json(ListResponse::new(clients)).into_response())
}

async fn get_client(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<Client>>, AppError> {
    Ok(Json(DataResponse::new(controller(&state).get(id).await?)))
}

async fn create_client(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateClientRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let client = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("Client created successfully", "client", client),
    ))
}

async fn update_client(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateClientRequest>,
) -> Result<Json<Value>, AppError> {
    let client = controller(&state).update(id, request).await?;
    Ok(mutation_response("Client updated successfully", "client", client))
}

async fn update_client_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: ValidatedJson<UpdateClientRequest>,
) -> Result<Json<Value>, AppError> {
    update_client(state, PathId(require_id(query.id)?), body).await
}

async fn delete_client(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(delete_response("Client deleted successfully"))
}

async fn delete_client_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_client(state, PathId(require_id(query.id)?)).await
}
