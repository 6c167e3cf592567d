use crate::dto::expense_dto::{CreateExpenseRequest, ExpenseQuery, UpdateExpenseRequest};
use crate::models::expense::Expense;
use crate::repositories::expense_repository::{ExpenseFilter, ExpenseRepository};
use crate::repositories::job_repository::JobRepository;
use crate::repositories::supplier_repository::SupplierRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::normalize_optional;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ExpenseController {
    repository: ExpenseRepository,
    jobs: JobRepository,
    suppliers: SupplierRepository,
}

impl ExpenseController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ExpenseRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            suppliers: SupplierRepository::new(pool),
        }
    }

    pub async fn list(&self, query: &ExpenseQuery) -> AppResult<Vec<Expense>> {
        let filter = ExpenseFilter {
            job_id: query.job_id,
            supplier_id: query.supplier_id,
        };
        self.repository.list(&filter).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Expense> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Expense", id))
    }

    /// Job number copied onto the expense
    async fn job_number(&self, job_id: Uuid) -> AppResult<String> {
        self.jobs
            .find_by_id(job_id)
            .await?
            .map(|job| job.job_number)
            .ok_or_else(|| AppError::BadRequest(format!("Job {} does not exist", job_id)))
    }

    /// Supplier name copied onto the expense
    async fn supplier_name(&self, supplier_id: Uuid) -> AppResult<String> {
        self.suppliers
            .find_by_id(supplier_id)
            .await?
            .map(|supplier| supplier.name)
            .ok_or_else(|| AppError::BadRequest(format!("Supplier {} does not exist", supplier_id)))
    }

    pub async fn create(&self, request: CreateExpenseRequest) -> AppResult<Expense> {
        let job_number = match request.job_id {
            Some(job_id) => Some(self.job_number(job_id).await?),
            None => None,
        };
        let supplier_name = match request.supplier_id {
            Some(supplier_id) => Some(self.supplier_name(supplier_id).await?),
            None => None,
        };

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4(),
            title: request.title.unwrap_or_default().trim().to_string(),
            amount: request.amount.unwrap_or_default(),
            currency: request.currency.unwrap_or_default(),
            job_id: request.job_id,
            job_number,
            supplier_id: request.supplier_id,
            supplier_name,
            expense_date: request.expense_date.unwrap_or_else(|| now.date_naive()),
            notes: normalize_optional(request.notes),
            created_at: now,
            updated_at: now,
        };

        self.repository.create(&expense).await
    }

    /// Expense attached to `job_id`, whatever the body says
    pub async fn create_for_job(
        &self,
        job_id: Uuid,
        mut request: CreateExpenseRequest,
    ) -> AppResult<Expense> {
        if self.jobs.find_by_id(job_id).await?.is_none() {
            return Err(not_found_error("Job", job_id));
        }
        request.job_id = Some(job_id);
        self.create(request).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateExpenseRequest) -> AppResult<Expense> {
        let mut expense = self.get(id).await?;

        if let Some(job_id) = request.job_id {
            expense.job_number = Some(self.job_number(job_id).await?);
            expense.job_id = Some(job_id);
        }
        if let Some(supplier_id) = request.supplier_id {
            expense.supplier_name = Some(self.supplier_name(supplier_id).await?);
            expense.supplier_id = Some(supplier_id);
        }
        if let Some(title) = request.title {
            expense.title = title.trim().to_string();
        }
        if let Some(amount) = request.amount {
            expense.amount = amount;
        }
        if let Some(currency) = request.currency {
            expense.currency = currency;
        }
        if let Some(expense_date) = request.expense_date {
            expense.expense_date = expense_date;
        }
        if request.notes.is_some() {
            expense.notes = normalize_optional(request.notes);
        }

        self.repository.update(&expense).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Expense", id));
        }
        Ok(())
    }
}
