pub mod client_repository;
pub mod expense_repository;
pub mod invoice_repository;
pub mod job_repository;
pub mod sequence_repository;
pub mod service_repository;
pub mod supplier_repository;
pub mod user_repository;

pub use client_repository::ClientRepository;
pub use expense_repository::{ExpenseFilter, ExpenseRepository};
pub use invoice_repository::{InvoiceFilter, InvoiceRepository};
pub use job_repository::{JobFilter, JobRepository};
pub use service_repository::ServiceItemRepository;
pub use supplier_repository::SupplierRepository;
pub use user_repository::UserRepository;
