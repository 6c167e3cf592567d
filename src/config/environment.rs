//! Environment configuration
//!
//! Reads the process environment (after `dotenvy` has loaded `.env`) into a
//! typed configuration shared by every handler through `AppState`.

use anyhow::{anyhow, Context, Result};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

const DEV_JWT_SECRET: &str = "development-only-secret-change-me";

/// Process-wide configuration
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub jwt_expiration: u64,
    pub upload_dir: PathBuf,
    pub default_vat_percent: Decimal,
    pub run_migrations: bool,
    pub log_level: String,
}

impl EnvironmentConfig {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` is always required; `JWT_SECRET` is required unless
    /// `ENVIRONMENT=development`.
    pub fn from_env() -> Result<Self> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == "development" => DEV_JWT_SECRET.to_string(),
            _ => return Err(anyhow!("JWT_SECRET must be set outside development")),
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", 3000)?,
            database_url,
            jwt_secret,
            jwt_expiration: parse_var("JWT_EXPIRATION", 86_400)?,
            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            default_vat_percent: parse_var("DEFAULT_VAT_PERCENT", Decimal::from(18))?,
            run_migrations: parse_var("RUN_MIGRATIONS", true)?,
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            environment,
        })
    }

    /// Configuration for tests and local tooling, no environment access.
    pub fn for_tests(database_url: &str) -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            database_url: database_url.to_string(),
            jwt_secret: "test-secret".to_string(),
            jwt_expiration: 86_400,
            upload_dir: env::temp_dir().join("logistics-backoffice-uploads"),
            default_vat_percent: Decimal::from(18),
            run_migrations: false,
            log_level: "debug".to_string(),
        }
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Address the HTTP server binds to
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Max level for the tracing subscriber; unknown values fall back to INFO
    pub fn tracing_level(&self) -> tracing::Level {
        tracing::Level::from_str(&self.log_level).unwrap_or(tracing::Level::INFO)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{} has an invalid value '{}': {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_url() {
        let mut config = EnvironmentConfig::for_tests("postgres://localhost/test");
        config.host = "localhost".to_string();
        config.port = 8080;
        assert_eq!(config.server_url(), "localhost:8080");
    }

    #[test]
    fn test_tracing_level_fallback() {
        let mut config = EnvironmentConfig::for_tests("postgres://localhost/test");
        config.log_level = "warn".to_string();
        assert_eq!(config.tracing_level(), tracing::Level::WARN);

        config.log_level = "verbose".to_string();
        assert_eq!(config.tracing_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_parse_var_default_when_missing() {
        let value: u16 = parse_var("LOGISTICS_TEST_SURELY_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }
}
