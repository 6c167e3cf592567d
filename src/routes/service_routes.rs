use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::service_controller::ServiceItemController;
use crate::dto::common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
use crate::dto::service_dto::{CreateServiceItemRequest, ServiceItemQuery, UpdateServiceItemRequest};
use crate::models::ServiceItem;
use crate::routes::{method_fallback, require_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_service_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_services)
                .post(create_service)
                .put(update_service_by_query)
                .delete(delete_service_by_query)
                .fallback(method_fallback),
        )
        .route(
            "/:id",
            get(get_service)
                .put(update_service)
                .delete(delete_service)
                .fallback(method_fallback),
        )
}

fn controller(state: &AppState) -> ServiceItemController {
    ServiceItemController::new(state.pool.clone(), state.config.default_vat_percent)
}

/// Catalog, optionally filtered by `?currency=`
async fn list_services(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ServiceItemQuery>,
) -> Result<Response, AppError> {
    let controller = controller(&state);
    if let Some(id) = query.id {
        let service = controller.get(id).await?;
        return Ok(Json(DataResponse::new(service)).into_response());
    }
    let services = controller.list(&query).await?;
    Ok(Json(ListResponse::new(services)).into_response())
}

async fn get_service(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<ServiceItem>>, AppError> {
    Ok(Json(DataResponse::new(controller(&state).get(id).await?)))
}

async fn create_service(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateServiceItemRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("Service created successfully", "service", service),
    ))
}

async fn update_service(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateServiceItemRequest>,
) -> Result<Json<Value>, AppError> {
    let service = controller(&state).update(id, request).await?;
    Ok(mutation_response("Service updated successfully", "service", service))
}

async fn update_service_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: ValidatedJson<UpdateServiceItemRequest>,
) -> Result<Json<Value>, AppError> {
    update_service(state, PathId(require_id(query.id)?), body).await
}

async fn delete_service(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(delete_response("Service deleted successfully"))
}

async fn delete_service_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_service(state, PathId(require_id(query.id)?)).await
}
