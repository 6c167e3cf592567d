use crate::models::job::{FlatJobDetails, JobDraft, JobRow, JobStatus, JobType, LogisticsJob};
use crate::repositories::sequence_repository::allocate_number;
use crate::services::job_number::NumberSeries;
use crate::utils::errors::AppResult;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

/// List filters; `None` matches everything
#[derive(Debug, Default, Clone)]
pub struct JobFilter {
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
    pub client_id: Option<Uuid>,
}

pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Allocates the job number and inserts the job in one transaction
    pub async fn create(&self, draft: &JobDraft) -> AppResult<LogisticsJob> {
        let mut tx = self.pool.begin().await?;
        let job_number = allocate_number(&mut tx, NumberSeries::Job(draft.job_type)).await?;
        let flat = FlatJobDetails::from(&draft.details);
        let now = Utc::now();

        let row = sqlx::query_as::<_, JobRow>(
            r#"
            INSERT INTO jobs (
                id, job_number, title, client_id, job_type, status, origin, destination,
                cargo_description, weight_kg, packages,
                awb_number, hawb_number, flight_number,
                bill_of_lading_number, container_number, vessel_name,
                truck_plate_number, trailer_plate_number, driver_name,
                created_by_id, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21, $22, $22)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&job_number)
        .bind(&draft.title)
        .bind(draft.client_id)
        .bind(draft.job_type)
        .bind(draft.status)
        .bind(&draft.origin)
        .bind(&draft.destination)
        .bind(&draft.cargo_description)
        .bind(draft.weight_kg)
        .bind(draft.packages)
        .bind(&flat.awb_number)
        .bind(&flat.hawb_number)
        .bind(&flat.flight_number)
        .bind(&flat.bill_of_lading_number)
        .bind(&flat.container_number)
        .bind(&flat.vessel_name)
        .bind(&flat.truck_plate_number)
        .bind(&flat.trailer_plate_number)
        .bind(&flat.driver_name)
        .bind(draft.created_by_id)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        info!("📦 Job {} created ({:?})", row.job_number, row.job_type);
        Ok(row.into())
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<LogisticsJob>> {
        let row = sqlx::query_as::<_, JobRow>("SELECT * FROM jobs WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(LogisticsJob::from))
    }

    pub async fn list(&self, filter: &JobFilter) -> AppResult<Vec<LogisticsJob>> {
        let rows = sqlx::query_as::<_, JobRow>(
            r#"
            SELECT * FROM jobs
            WHERE ($1::job_type IS NULL OR job_type = $1)
              AND ($2::job_status IS NULL OR status = $2)
              AND ($3::uuid IS NULL OR client_id = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.job_type)
        .bind(filter.status)
        .bind(filter.client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LogisticsJob::from).collect())
    }

    /// Writes every mutable column; the job number never changes
    pub async fn update(&self, job: &LogisticsJob) -> AppResult<LogisticsJob> {
        let flat = FlatJobDetails::from(&job.details);

        let row = sqlx::query_as::<_, JobRow>(
            r#"
            UPDATE jobs
            SET title = $2, client_id = $3, job_type = $4, status = $5, origin = $6,
                destination = $7, cargo_description = $8, weight_kg = $9, packages = $10,
                awb_number = $11, hawb_number = $12, flight_number = $13,
                bill_of_lading_number = $14, container_number = $15, vessel_name = $16,
                truck_plate_number = $17, trailer_plate_number = $18, driver_name = $19,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job.id)
        .bind(&job.title)
        .bind(job.client_id)
        .bind(job.job_type)
        .bind(job.status)
        .bind(&job.origin)
        .bind(&job.destination)
        .bind(&job.cargo_description)
        .bind(job.weight_kg)
        .bind(job.packages)
        .bind(&flat.awb_number)
        .bind(&flat.hawb_number)
        .bind(&flat.flight_number)
        .bind(&flat.bill_of_lading_number)
        .bind(&flat.container_number)
        .bind(&flat.vessel_name)
        .bind(&flat.truck_plate_number)
        .bind(&flat.trailer_plate_number)
        .bind(&flat.driver_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Invoices and expenses attached to the job
    pub async fn reference_counts(&self, id: Uuid) -> AppResult<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM invoices WHERE job_id = $1),
                (SELECT COUNT(*) FROM expenses WHERE job_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
