//! Logistics job model
//!
//! `LogisticsJob` carries its mode-specific fields as a tagged `JobDetails`
//! union. The `jobs` table stores them flattened into nullable columns;
//! `JobRow` and `FlatJobDetails` are the only places that know the flat
//! layout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Freight mode, derived from the job type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportMode {
    Air,
    Sea,
    Road,
}

/// Maps to the `job_type` ENUM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Type)]
#[sqlx(type_name = "job_type", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobType {
    AirImport,
    AirExport,
    SeaImport,
    SeaExport,
    RoadImport,
    RoadExport,
}

impl JobType {
    pub const ALL: [JobType; 6] = [
        JobType::AirImport,
        JobType::AirExport,
        JobType::SeaImport,
        JobType::SeaExport,
        JobType::RoadImport,
        JobType::RoadExport,
    ];

    pub fn mode(self) -> TransportMode {
        match self {
            JobType::AirImport | JobType::AirExport => TransportMode::Air,
            JobType::SeaImport | JobType::SeaExport => TransportMode::Sea,
            JobType::RoadImport | JobType::RoadExport => TransportMode::Road,
        }
    }

    /// Abbreviation used inside job numbers
    pub fn abbreviation(self) -> &'static str {
        match self {
            JobType::AirImport => "AI",
            JobType::AirExport => "AE",
            JobType::SeaImport => "SI",
            JobType::SeaExport => "SE",
            JobType::RoadImport => "RI",
            JobType::RoadExport => "RE",
        }
    }
}

/// Maps to the `job_status` ENUM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "job_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

/// Mode-specific shipping documents and equipment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobDetails {
    #[serde(rename_all = "camelCase")]
    Air {
        /// Master air waybill
        awb_number: Option<String>,
        /// House air waybill
        hawb_number: Option<String>,
        flight_number: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Sea {
        bill_of_lading_number: Option<String>,
        container_number: Option<String>,
        vessel_name: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Road {
        truck_plate_number: Option<String>,
        trailer_plate_number: Option<String>,
        driver_name: Option<String>,
    },
}

impl JobDetails {
    /// Details with every field unset
    pub fn empty(mode: TransportMode) -> Self {
        match mode {
            TransportMode::Air => JobDetails::Air {
                awb_number: None,
                hawb_number: None,
                flight_number: None,
            },
            TransportMode::Sea => JobDetails::Sea {
                bill_of_lading_number: None,
                container_number: None,
                vessel_name: None,
            },
            TransportMode::Road => JobDetails::Road {
                truck_plate_number: None,
                trailer_plate_number: None,
                driver_name: None,
            },
        }
    }

    pub fn mode(&self) -> TransportMode {
        match self {
            JobDetails::Air { .. } => TransportMode::Air,
            JobDetails::Sea { .. } => TransportMode::Sea,
            JobDetails::Road { .. } => TransportMode::Road,
        }
    }
}

/// Column layout of the mode-specific fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatJobDetails {
    pub awb_number: Option<String>,
    pub hawb_number: Option<String>,
    pub flight_number: Option<String>,
    pub bill_of_lading_number: Option<String>,
    pub container_number: Option<String>,
    pub vessel_name: Option<String>,
    pub truck_plate_number: Option<String>,
    pub trailer_plate_number: Option<String>,
    pub driver_name: Option<String>,
}

impl From<&JobDetails> for FlatJobDetails {
    fn from(details: &JobDetails) -> Self {
        match details.clone() {
            JobDetails::Air {
                awb_number,
                hawb_number,
                flight_number,
            } => Self {
                awb_number,
                hawb_number,
                flight_number,
                ..Default::default()
            },
            JobDetails::Sea {
                bill_of_lading_number,
                container_number,
                vessel_name,
            } => Self {
                bill_of_lading_number,
                container_number,
                vessel_name,
                ..Default::default()
            },
            JobDetails::Road {
                truck_plate_number,
                trailer_plate_number,
                driver_name,
            } => Self {
                truck_plate_number,
                trailer_plate_number,
                driver_name,
                ..Default::default()
            },
        }
    }
}

impl FlatJobDetails {
    /// Rebuild the union, keeping only the columns of the given mode
    pub fn into_details(self, mode: TransportMode) -> JobDetails {
        match mode {
            TransportMode::Air => JobDetails::Air {
                awb_number: self.awb_number,
                hawb_number: self.hawb_number,
                flight_number: self.flight_number,
            },
            TransportMode::Sea => JobDetails::Sea {
                bill_of_lading_number: self.bill_of_lading_number,
                container_number: self.container_number,
                vessel_name: self.vessel_name,
            },
            TransportMode::Road => JobDetails::Road {
                truck_plate_number: self.truck_plate_number,
                trailer_plate_number: self.trailer_plate_number,
                driver_name: self.driver_name,
            },
        }
    }
}

/// Everything needed to insert a job; number, id and timestamps are assigned on insert
#[derive(Debug, Clone)]
pub struct JobDraft {
    pub title: String,
    pub client_id: Uuid,
    pub job_type: JobType,
    pub status: JobStatus,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub cargo_description: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub packages: Option<i32>,
    pub details: JobDetails,
    pub created_by_id: Option<Uuid>,
}

/// Row of the `jobs` table
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: Uuid,
    pub job_number: String,
    pub title: String,
    pub client_id: Uuid,
    pub job_type: JobType,
    pub status: JobStatus,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub cargo_description: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub packages: Option<i32>,
    pub awb_number: Option<String>,
    pub hawb_number: Option<String>,
    pub flight_number: Option<String>,
    pub bill_of_lading_number: Option<String>,
    pub container_number: Option<String>,
    pub vessel_name: Option<String>,
    pub truck_plate_number: Option<String>,
    pub trailer_plate_number: Option<String>,
    pub driver_name: Option<String>,
    pub created_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A freight job as the API sees it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsJob {
    pub id: Uuid,
    pub job_number: String,
    pub title: String,
    pub client_id: Uuid,
    pub job_type: JobType,
    pub status: JobStatus,
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub cargo_description: Option<String>,
    pub weight_kg: Option<Decimal>,
    pub packages: Option<i32>,
    pub details: JobDetails,
    pub created_by_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<JobRow> for LogisticsJob {
    fn from(row: JobRow) -> Self {
        let flat = FlatJobDetails {
            awb_number: row.awb_number,
            hawb_number: row.hawb_number,
            flight_number: row.flight_number,
            bill_of_lading_number: row.bill_of_lading_number,
            container_number: row.container_number,
            vessel_name: row.vessel_name,
            truck_plate_number: row.truck_plate_number,
            trailer_plate_number: row.trailer_plate_number,
            driver_name: row.driver_name,
        };

        Self {
            id: row.id,
            job_number: row.job_number,
            title: row.title,
            client_id: row.client_id,
            job_type: row.job_type,
            status: row.status,
            origin: row.origin,
            destination: row.destination,
            cargo_description: row.cargo_description,
            weight_kg: row.weight_kg,
            packages: row.packages,
            details: flat.into_details(row.job_type.mode()),
            created_by_id: row.created_by_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_abbreviations_are_unique() {
        let mut seen: Vec<&str> = JobType::ALL.iter().map(|t| t.abbreviation()).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), JobType::ALL.len());
    }

    #[test]
    fn test_details_deserialize_from_tagged_json() {
        let details: JobDetails = serde_json::from_value(json!({
            "mode": "SEA",
            "billOfLadingNumber": "MSCU1234567",
            "containerNumber": "MSKU7654321"
        }))
        .unwrap();

        assert_eq!(details.mode(), TransportMode::Sea);
        assert_eq!(
            details,
            JobDetails::Sea {
                bill_of_lading_number: Some("MSCU1234567".to_string()),
                container_number: Some("MSKU7654321".to_string()),
                vessel_name: None,
            }
        );
    }

    #[test]
    fn test_flattening_keeps_only_one_group() {
        let details = JobDetails::Road {
            truck_plate_number: Some("T 123 ABC".to_string()),
            trailer_plate_number: None,
            driver_name: Some("J. Mushi".to_string()),
        };
        let flat = FlatJobDetails::from(&details);

        assert_eq!(flat.truck_plate_number.as_deref(), Some("T 123 ABC"));
        assert!(flat.awb_number.is_none());
        assert!(flat.bill_of_lading_number.is_none());
        assert_eq!(flat.into_details(TransportMode::Road), details);
    }

    #[test]
    fn test_stray_columns_are_dropped_for_other_modes() {
        let flat = FlatJobDetails {
            awb_number: Some("176-12345675".to_string()),
            container_number: Some("leftover".to_string()),
            ..Default::default()
        };
        match flat.into_details(TransportMode::Air) {
            JobDetails::Air { awb_number, .. } => {
                assert_eq!(awb_number.as_deref(), Some("176-12345675"))
            }
            other => panic!("unexpected details {:?}", other),
        }
    }

    #[test]
    fn test_job_type_mode() {
        assert_eq!(JobType::SeaExport.mode(), TransportMode::Sea);
        assert_eq!(JobType::RoadImport.mode(), TransportMode::Road);
        assert_eq!(JobType::AirExport.mode(), TransportMode::Air);
    }
}
