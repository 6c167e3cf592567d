use axum::{
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;

use crate::controllers::expense_controller::ExpenseController;
use crate::controllers::job_controller::JobController;
use crate::dto::common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
use crate::dto::expense_dto::{CreateExpenseRequest, ExpenseQuery};
use crate::dto::job_dto::{CreateJobRequest, JobQuery, UpdateJobRequest};
use crate::middleware::auth::{optional_auth, AuthenticatedUser};
use crate::models::LogisticsJob;
use crate::routes::{method_fallback, require_id};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::{PathId, QueryParams, ValidatedJson};

/// A bearer token, when present, fills `createdById` on new jobs
pub fn create_job_router(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_jobs)
                .post(create_job)
                .put(update_job_by_query)
                .delete(delete_job_by_query)
                .fallback(method_fallback),
        )
        .route(
            "/:id",
            get(get_job)
                .put(update_job)
                .delete(delete_job)
                .fallback(method_fallback),
        )
        .route(
            "/:id/expenses",
            get(list_job_expenses)
                .post(create_job_expense)
                .fallback(method_fallback),
        )
        .route_layer(from_fn_with_state(state, optional_auth))
}

/// Filters: `?type=`, `?status=`, `?clientId=`; `?id=` returns one job
async fn list_jobs(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<JobQuery>,
) -> Result<Response, AppError> {
    let controller = JobController::new(state.pool.clone());
    if let Some(id) = query.id {
        let job = controller.get(id).await?;
        return Ok(Json(DataResponse::new(job)).into_response());
    }
    let jobs = controller.list(&query).await?;
    Ok(Json(ListResponse::new(jobs)).into_response())
}

async fn get_job(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<DataResponse<LogisticsJob>>, AppError> {
    let controller = JobController::new(state.pool.clone());
    Ok(Json(DataResponse::new(controller.get(id).await?)))
}

async fn create_job(
    State(state): State<AppState>,
    user: Option<Extension<AuthenticatedUser>>,
    ValidatedJson(mut request): ValidatedJson<CreateJobRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    if request.created_by_id.is_none() {
        request.created_by_id = user.map(|Extension(user)| user.user_id);
    }

    let controller = JobController::new(state.pool.clone());
    let job = controller.create(request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("Job created successfully", "job", job),
    ))
}

async fn update_job(
    State(state): State<AppState>,
    PathId(id): PathId,
    ValidatedJson(request): ValidatedJson<UpdateJobRequest>,
) -> Result<Json<Value>, AppError> {
    let controller = JobController::new(state.pool.clone());
    let job = controller.update(id, request).await?;
    Ok(mutation_response("Job updated successfully", "job", job))
}

async fn update_job_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
    body: ValidatedJson<UpdateJobRequest>,
) -> Result<Json<Value>, AppError> {
    update_job(state, PathId(require_id(query.id)?), body).await
}

async fn delete_job(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> Result<Json<Value>, AppError> {
    let controller = JobController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(delete_response("Job deleted successfully"))
}

async fn delete_job_by_query(
    state: State<AppState>,
    QueryParams(query): QueryParams<IdQuery>,
) -> Result<Json<Value>, AppError> {
    delete_job(state, PathId(require_id(query.id)?)).await
}

async fn list_job_expenses(
    State(state): State<AppState>,
    PathId(job_id): PathId,
) -> Result<Json<ListResponse<crate::models::Expense>>, AppError> {
    JobController::new(state.pool.clone()).get(job_id).await?;

    let query = ExpenseQuery {
        job_id: Some(job_id),
        ..Default::default()
    };
    let expenses = ExpenseController::new(state.pool.clone()).list(&query).await?;
    Ok(Json(ListResponse::new(expenses)))
}

async fn create_job_expense(
    State(state): State<AppState>,
    PathId(job_id): PathId,
    ValidatedJson(request): ValidatedJson<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let controller = ExpenseController::new(state.pool.clone());
    let expense = controller.create_for_job(job_id, request).await?;
    Ok((
        StatusCode::CREATED,
        mutation_response("Expense created successfully", "expense", expense),
    ))
}
