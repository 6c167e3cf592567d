use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::invoice_controller::{preview_lines, InvoiceController};
use crate::dto::common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
use crate::dto::invoice_dto::{
    CreateInvoiceRequest, InvoicePreviewRequest, InvoicePreviewResponse, InvoiceQuery,
    UpdateInvoiceRequest,
};
use crate::models::InvoiceWithItems;
use crate::routes::{method_fallback, require_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_invoice_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_invoices)
                .post(create_invoice)
                .put(update_invoice_by_query)
                .delete(delete_invoice_by_query)
                .fallback(method_fallback),
        )
        .route("/preview", post(preview_invoice).fallback(method_fallback))
        .route(
            "/:id",
            get(get_invoice)
                .put(update_invoice)
                .delete(delete_invoice)
                .fallback(method_fallback),
        )
}

async fn list_invoices(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<InvoiceQuery>,
) -> Result<Response, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    if let Some(id) = query.id {
        let invoice = controller.get(id).await?;
        return Ok(Json(DataResponse::new(invoice)).into_response());
    }
    let invoices = controller.list(&query).await?;
    Ok(Json(ListResponse::new(invoices)).into_response())
}

async fn get_invoice(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<InvoiceWithItems>>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    Ok(Json(DataResponse::new(controller.get(id).await?)))
}

/// The body is fully validated before anything is written
async fn create_invoice(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let invoice = controller.create(request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("Invoice created successfully", "invoice", invoice),
    ))
}

async fn update_invoice(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateInvoiceRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    let invoice = controller.update(id, request).await?;
    Ok(mutation_response("Invoice updated successfully", "invoice", invoice))
}

async fn update_invoice_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: ValidatedJson<UpdateInvoiceRequest>,
) -> Result<Json<Value>, AppError> {
    update_invoice(state, PathId(require_id(query.id)?), body).await
}

async fn delete_invoice(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Value>, AppError> {
    let controller = InvoiceController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(delete_response("Invoice deleted successfully"))
}

async fn delete_invoice_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_invoice(state, PathId(require_id(query.id)?)).await
}

/// Only touches the database when `serviceItemIds` is given
async fn preview_invoice(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<InvoicePreviewRequest>,
) -> Result<Json<DataResponse<InvoicePreviewResponse>>, AppError> {
    let response = if request.service_item_ids.is_empty() {
        preview_lines(request)?
    } else {
        InvoiceController::new(state.pool.clone()).preview(request).await?
    };
    Ok(Json(DataResponse::new(response)))
}
