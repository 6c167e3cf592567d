pub mod auth_controller;
pub mod client_controller;
pub mod expense_controller;
pub mod invoice_controller;
pub mod job_controller;
pub mod profile_controller;
pub mod service_controller;
pub mod supplier_controller;
pub mod user_controller;
