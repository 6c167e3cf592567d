//! Logistics back-office API
//!
//! REST endpoints for clients, freight jobs, invoices, expenses,
//! suppliers, services and users, backed by PostgreSQL.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::build_router;
pub use state::AppState;
