use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::job::{JobDetails, JobStatus, JobType};
use crate::utils::validation::{validate_quantity, validate_not_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    #[validate(required, length(max = 255), custom = "validate_not_blank")]
    pub title: Option<String>,
    #[validate(required)]
    pub client_id: Option<Uuid>,
    #[validate(required)]
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
    #[validate(length(max = 255))]
    pub origin: Option<String>,
    #[validate(length(max = 255))]
    pub destination: Option<String>,
    #[validate(length(max = 2000))]
    pub cargo_description: Option<String>,
    #[validate(custom = "validate_quantity")]
    pub weight_kg: Option<Decimal>,
    #[validate(range(min = 0))]
    pub packages: Option<i32>,
    /// Must use the same mode as `job_type`; empty details when absent
    pub details: Option<JobDetails>,
    pub created_by_id: Option<Uuid>,
}

/// Partial update. The job number is kept even when the type changes.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub title: Option<String>,
    pub client_id: Option<Uuid>,
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
    #[validate(length(max = 255))]
    pub origin: Option<String>,
    #[validate(length(max = 255))]
    pub destination: Option<String>,
    #[validate(length(max = 2000))]
    pub cargo_description: Option<String>,
    #[validate(custom = "validate_quantity")]
    pub weight_kg: Option<Decimal>,
    #[validate(range(min = 0))]
    pub packages: Option<i32>,
    pub details: Option<JobDetails>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobQuery {
    pub id: Option<Uuid>,
    #[serde(rename = "type")]
    pub job_type: Option<JobType>,
    pub status: Option<JobStatus>,
    pub client_id: Option<Uuid>,
}
