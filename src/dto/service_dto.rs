use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{
    validate_currency_code, validate_money, validate_not_blank, validate_percent,
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceItemRequest {
    #[validate(required, length(max = 255), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(required, custom = "validate_money")]
    pub price: Option<Decimal>,
    #[validate(required, custom = "validate_currency_code")]
    pub currency: Option<String>,
    pub vat_enabled: Option<bool>,
    /// Falls back to the configured default rate when VAT is enabled
    #[validate(custom = "validate_percent")]
    pub vat_percent: Option<Decimal>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceItemRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(custom = "validate_money")]
    pub price: Option<Decimal>,
    #[validate(custom = "validate_currency_code")]
    pub currency: Option<String>,
    pub vat_enabled: Option<bool>,
    #[validate(custom = "validate_percent")]
    pub vat_percent: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServiceItemQuery {
    pub id: Option<Uuid>,
    pub currency: Option<String>,
}
