use crate::models::expense::Expense;
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Debug, Default, Clone)]
pub struct ExpenseFilter {
    pub job_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
}

pub struct ExpenseRepository {
    pool: PgPool,
}

impl ExpenseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, expense: &Expense) -> AppResult<Expense> {
        let result = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (
                id, title, amount, currency, job_id, job_number, supplier_id, supplier_name,
                expense_date, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(expense.id)
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(&expense.currency)
        .bind(expense.job_id)
        .bind(&expense.job_number)
        .bind(expense.supplier_id)
        .bind(&expense.supplier_name)
        .bind(expense.expense_date)
        .bind(&expense.notes)
        .bind(expense.created_at)
        .bind(expense.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Expense>> {
        let result = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list(&self, filter: &ExpenseFilter) -> AppResult<Vec<Expense>> {
        let result = sqlx::query_as::<_, Expense>(
            r#"
            SELECT * FROM expenses
            WHERE ($1::uuid IS NULL OR job_id = $1)
              AND ($2::uuid IS NULL OR supplier_id = $2)
            ORDER BY expense_date DESC, created_at DESC
            "#,
        )
        .bind(filter.job_id)
        .bind(filter.supplier_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(&self, expense: &Expense) -> AppResult<Expense> {
        let result = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET title = $2, amount = $3, currency = $4, job_id = $5, job_number = $6,
                supplier_id = $7, supplier_name = $8, expense_date = $9, notes = $10,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(expense.id)
        .bind(&expense.title)
        .bind(expense.amount)
        .bind(&expense.currency)
        .bind(expense.job_id)
        .bind(&expense.job_number)
        .bind(expense.supplier_id)
        .bind(&expense.supplier_name)
        .bind(expense.expense_date)
        .bind(&expense.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
