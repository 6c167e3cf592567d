//! Validation utilities
//!
//! Custom field validators for `validator` derives and the `ValidatedJson`
//! extractor, which turns every malformed or invalid body into a 400.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::utils::errors::AppError;

lazy_static! {
    static ref CURRENCY_CODE: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
}

/// Money columns are NUMERIC(14, 2); amounts in words stop below a trillion
pub const MAX_MONEY: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0); // 1_000_000_000_000

/// Quantity and weight columns are NUMERIC(12, 2)
pub const MAX_QUANTITY: Decimal = Decimal::from_parts(0x540B_E400, 0x2, 0, false, 0); // 10_000_000_000

/// Three uppercase letters, e.g. `USD`, `TZS`
pub fn validate_currency_code(value: &str) -> Result<(), ValidationError> {
    if CURRENCY_CODE.is_match(value) {
        return Ok(());
    }
    let mut error = ValidationError::new("currency");
    error.add_param("value".into(), &value.to_string());
    error.message = Some("currency must be a three-letter uppercase code".into());
    Err(error)
}

fn validate_bounded(value: &Decimal, max: Decimal, code: &'static str) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        let mut error = ValidationError::new(code);
        error.add_param("value".into(), &value.to_string());
        error.message = Some("value must not be negative".into());
        return Err(error);
    }
    if *value >= max {
        let mut error = ValidationError::new(code);
        error.add_param("value".into(), &value.to_string());
        error.add_param("max".into(), &max.to_string());
        error.message = Some(format!("value must be below {}", max).into());
        return Err(error);
    }
    Ok(())
}

/// Non-negative and below `MAX_MONEY`
pub fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    validate_bounded(value, MAX_MONEY, "money")
}

/// Non-negative and below `MAX_QUANTITY`
pub fn validate_quantity(value: &Decimal) -> Result<(), ValidationError> {
    validate_bounded(value, MAX_QUANTITY, "quantity")
}

/// Percentages between 0 and 100 inclusive
pub fn validate_percent(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO || *value > Decimal::ONE_HUNDRED {
        let mut error = ValidationError::new("percent");
        error.add_param("value".into(), &value.to_string());
        error.message = Some("percentage must be between 0 and 100".into());
        return Err(error);
    }
    Ok(())
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_blank");
        error.message = Some("value must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Treat empty or whitespace-only strings as absent
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// JSON body extractor that runs `Validate` and maps rejections to 400
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query-string extractor whose rejection is a JSON 400
#[derive(Debug, Clone, Default)]
pub struct QueryParams<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for QueryParams<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `/:id` path segment parsed as a UUID
#[derive(Debug, Clone, Copy)]
pub struct PathId(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for PathId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<Uuid>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("id must be a valid UUID".to_string()))?;
        Ok(Self(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("usd").is_err());
        assert!(validate_currency_code("USDT").is_err());
    }

    #[test]
    fn test_money_bounds() {
        assert!(validate_money(&Decimal::ZERO).is_ok());
        assert!(validate_money(&Decimal::from_str("12.50").unwrap()).is_ok());
        assert!(validate_money(&Decimal::from_str("999999999999.99").unwrap()).is_ok());
        assert!(validate_money(&Decimal::from_str("-0.01").unwrap()).is_err());
        assert!(validate_money(&MAX_MONEY).is_err());
        assert!(validate_money(&Decimal::from_str("50000000000000000000000000000").unwrap()).is_err());
    }

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(&Decimal::from(3)).is_ok());
        assert!(validate_quantity(&MAX_QUANTITY).is_err());
        assert!(validate_quantity(&Decimal::from(-1)).is_err());
    }

    #[test]
    fn test_percent_bounds() {
        assert!(validate_percent(&Decimal::from(18)).is_ok());
        assert!(validate_percent(&Decimal::from(100)).is_ok());
        assert!(validate_percent(&Decimal::from(101)).is_err());
    }

    #[test]
    fn test_normalize_optional() {
        assert_eq!(normalize_optional(Some("  ".to_string())), None);
        assert_eq!(normalize_optional(Some(" TIN-1 ".to_string())), Some("TIN-1".to_string()));
        assert_eq!(normalize_optional(None), None);
    }
}
