//! Database module
//!
//! Connection lifecycle for PostgreSQL.

pub mod connection;

pub use connection::{ping, DatabaseConnection};
