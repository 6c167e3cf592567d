//! Shared utilities
//!
//! Error handling, validation and JWT helpers.

pub mod errors;
pub mod jwt;
pub mod validation;

pub use errors::{AppError, AppResult};
pub use validation::{PathId, QueryParams, ValidatedJson};
