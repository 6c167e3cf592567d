use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::controllers::expense_controller::ExpenseController;
use crate::dto::common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
use crate::dto::expense_dto::{CreateExpenseRequest, ExpenseQuery, UpdateExpenseRequest};
use crate::models::Expense;
use crate::routes::{method_fallback, require_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

pub fn create_expense_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_expenses)
                .post(create_expense)
                .put(update_expense_by_query)
                .delete(delete_expense_by_query)
                .fallback(method_fallback),
        )
        .route(
            "/:id",
            get(get_expense)
                .put(update_expense)
                .delete(delete_expense)
                .fallback(method_fallback),
        )
}

/// Filters: `?jobId=`, `?supplierId=`
async fn list_expenses(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ExpenseQuery>,
) -> Result<Response, AppError> {
    let controller = ExpenseController::new(state.pool.clone());
    if let Some(id) = query.id {
        let expense = controller.get(id).await?;
        return Ok(Json(DataResponse::new(expense)).into_response());
    }
    let expenses = controller.list(&query).await?;
    Ok(Json(ListResponse::new(expenses)).into_response())
}

async fn get_expense(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<Expense>>, AppError> {
    let controller = ExpenseController::new(state.pool.clone());
    Ok(Json(DataResponse::new(controller.get(id).await?)))
}

async fn create_expense(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let controller = ExpenseController::new(state.pool.clone());
    let expense = controller.create(request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("Expense created successfully", "expense", expense),
    ))
}

async fn update_expense(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateExpenseRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = ExpenseController::new(state.pool.clone());
    let expense = controller.update(id, request).await?;
    Ok(mutation_response("Expense updated successfully", "expense", expense))
}

async fn update_expense_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: ValidatedJson<UpdateExpenseRequest>,
) -> Result<Json<Value>, AppError> {
    update_expense(state, PathId(require_id(query.id)?), body).await
}

async fn delete_expense(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Value>, AppError> {
    let controller = ExpenseController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(delete_response("Expense deleted successfully"))
}

async fn delete_expense_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_expense(state, PathId(require_id(query.id)?)).await
}
