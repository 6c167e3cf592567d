use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::supplier_controller::SupplierController;
use crate::dto::common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
use crate::dto::supplier_dto::{CreateSupplierRequest, SupplierQuery, UpdateSupplierRequest};
use crate::models::Supplier;
use crate::routes::{method_fallback, require_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_supplier_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_suppliers)
                .post(create_supplier)
                .put(update_supplier_by_query)
                .delete(delete_supplier_by_query)
                .fallback(method_fallback),
        )
        .route(
            "/:id",
            get(get_supplier)
                .put(update_supplier)
                .delete(delete_supplier)
                .fallback(method_fallback),
        )
}

fn controller(state: &AppState) -> SupplierController {
    SupplierController::new(state.pool.clone())
}

/// With `?id=` returns a single supplier
async fn list_suppliers(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SupplierQuery>,
) -> Result<Response, AppError> {
    let controller = controller(&state);
    if let Some(id) = query.id {
        let supplier = controller.get(id).await?;
        return Ok(Json(DataResponse::new(supplier)).into_response());
    }
    let suppliers = controller.list(&query).await?;
    Ok(Json(ListResponse::new(suppliers)).into_response())
}

async fn get_supplier(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<Supplier>>, AppError> {
    Ok(Json(DataResponse::new(controller(&state).get(id).await?)))
}

async fn create_supplier(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let supplier = controller(&state).create(request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("Supplier created successfully", "supplier", supplier),
    ))
}

async fn update_supplier(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateSupplierRequest>,
) -> Result<Json<Value>, AppError> {
    let supplier = controller(&state).update(id, request).await?;
    Ok(mutation_response("Supplier updated successfully", "supplier", supplier))
}

async fn update_supplier_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: ValidatedJson<UpdateSupplierRequest>,
) -> Result<Json<Value>, AppError> {
    update_supplier(state, PathId(require_id(query.id)?), body).await
}

async fn delete_supplier(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Value>, AppError> {
    controller(&state).delete(id).await?;
    Ok(delete_response("Supplier deleted successfully"))
}

async fn delete_supplier_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_supplier(state, PathId(require_id(query.id)?)).await
}
