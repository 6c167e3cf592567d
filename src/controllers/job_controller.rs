use crate::dto::job_dto::{CreateJobRequest, JobQuery, UpdateJobRequest};
use crate::models::job::{JobDetails, JobDraft, JobType, LogisticsJob};
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::job_repository::{JobFilter, JobRepository};
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::normalize_optional;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct JobController {
    repository: JobRepository,
    clients: ClientRepository,
}

/// Details for `job_type`: the given ones when their mode matches, empty
/// ones when absent.
pub fn resolve_details(job_type: JobType, details: Option<JobDetails>) -> AppResult<JobDetails> {
    match details {
        None => Ok(JobDetails::empty(job_type.mode())),
        Some(details) if details.mode() == job_type.mode() => Ok(details),
        Some(details) => Err(AppError::BadRequest(format!(
            "details.mode {:?} does not match job type {:?}",
            details.mode(),
            job_type
        ))),
    }
}

impl JobController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: JobRepository::new(pool.clone()),
            clients: ClientRepository::new(pool),
        }
    }

    pub async fn list(&self, query: &JobQuery) -> AppResult<Vec<LogisticsJob>> {
        let filter = JobFilter {
            job_type: query.job_type,
            status: query.status,
            client_id: query.client_id,
        };
        self.repository.list(&filter).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<LogisticsJob> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Job", id))
    }

    async fn ensure_client(&self, client_id: Uuid) -> AppResult<()> {
        if self.clients.find_by_id(client_id).await?.is_none() {
            return Err(AppError::BadRequest(format!("Client {} does not exist", client_id)));
        }
        Ok(())
    }

    pub async fn create(&self, request: CreateJobRequest) -> AppResult<LogisticsJob> {
        let (Some(title), Some(client_id), Some(job_type)) =
            (request.title, request.client_id, request.job_type)
        else {
            return Err(AppError::BadRequest("title, clientId and jobType are required".to_string()));
        };

        let details = resolve_details(job_type, request.details)?;
        self.ensure_client(client_id).await?;

        let draft = JobDraft {
            title: title.trim().to_string(),
            client_id,
            job_type,
            status: request.status.unwrap_or_default(),
            origin: normalize_optional(request.origin),
            destination: normalize_optional(request.destination),
            cargo_description: normalize_optional(request.cargo_description),
            weight_kg: request.weight_kg,
            packages: request.packages,
            details,
            created_by_id: request.created_by_id,
        };

        self.repository.create(&draft).await
    }

    /// A type change to another mode without new details clears the old ones
    pub async fn update(&self, id: Uuid, request: UpdateJobRequest) -> AppResult<LogisticsJob> {
        let mut job = self.get(id).await?;

        if let Some(client_id) = request.client_id {
            if client_id != job.client_id {
                self.ensure_client(client_id).await?;
            }
            job.client_id = client_id;
        }

        let job_type = request.job_type.unwrap_or(job.job_type);
        job.details = match request.details {
            Some(details) => resolve_details(job_type, Some(details))?,
            None if job_type.mode() == job.details.mode() => job.details,
            None => JobDetails::empty(job_type.mode()),
        };
        job.job_type = job_type;

        if let Some(title) = request.title {
            job.title = title.trim().to_string();
        }
        if let Some(status) = request.status {
            job.status = status;
        }
        if request.origin.is_some() {
            job.origin = normalize_optional(request.origin);
        }
        if request.destination.is_some() {
            job.destination = normalize_optional(request.destination);
        }
        if request.cargo_description.is_some() {
            job.cargo_description = normalize_optional(request.cargo_description);
        }
        if request.weight_kg.is_some() {
            job.weight_kg = request.weight_kg;
        }
        if request.packages.is_some() {
            job.packages = request.packages;
        }

        self.repository.update(&job).await
    }

    /// Jobs with invoices or expenses are kept
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let job = self.get(id).await?;

        let (invoices, expenses) = self.repository.reference_counts(id).await?;
        if invoices > 0 || expenses > 0 {
            return Err(AppError::BadRequest(format!(
                "Job {} is referenced by {} invoice(s) and {} expense(s)",
                job.job_number, invoices, expenses
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Job", id));
        }
        info!("🗑️ Job deleted: {}", job.job_number);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::TransportMode;

    #[test]
    fn test_missing_details_become_empty_for_mode() {
        let details = resolve_details(JobType::SeaImport, None).unwrap();
        assert_eq!(details, JobDetails::empty(TransportMode::Sea));
    }

    #[test]
    fn test_matching_details_are_kept() {
        let details = JobDetails::Air {
            awb_number: Some("176-12345675".to_string()),
            hawb_number: None,
            flight_number: Some("ET815".to_string()),
        };
        let resolved = resolve_details(JobType::AirExport, Some(details.clone())).unwrap();
        assert_eq!(resolved, details);
    }

    #[test]
    fn test_mode_mismatch_is_bad_request() {
        let details = JobDetails::empty(TransportMode::Road);
        let error = resolve_details(JobType::AirImport, Some(details)).unwrap_err();
        assert!(matches!(error, AppError::BadRequest(_)));
    }
}
