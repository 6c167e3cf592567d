//! Data models
//!
//! Rows of the PostgreSQL schema and the domain types built from them.

pub mod client;
pub mod expense;
pub mod invoice;
pub mod job;
pub mod service_item;
pub mod supplier;
pub mod user;

pub use client::Client;
pub use expense::Expense;
pub use invoice::{Invoice, InvoiceDraft, InvoiceLineItem, InvoiceStatus, InvoiceWithItems};
pub use job::{
    FlatJobDetails, JobDetails, JobDraft, JobRow, JobStatus, JobType, LogisticsJob, TransportMode,
};
pub use service_item::ServiceItem;
pub use supplier::Supplier;
pub use user::{User, UserRole};
