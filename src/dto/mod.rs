//! Request and response bodies
//!
//! JSON uses camelCase field names throughout.

pub mod auth_dto;
pub mod client_dto;
pub mod common_dto;
pub mod expense_dto;
pub mod invoice_dto;
pub mod job_dto;
pub mod profile_dto;
pub mod service_dto;
pub mod supplier_dto;
pub mod user_dto;

pub use common_dto::{delete_response, mutation_response, DataResponse, IdQuery, ListResponse};
