use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::utils::validation::{validate_currency_code, validate_money, validate_not_blank};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[validate(required, length(max = 255), custom = "validate_not_blank")]
    pub title: Option<String>,
    #[validate(required, custom = "validate_money")]
    pub amount: Option<Decimal>,
    #[validate(required, custom = "validate_currency_code")]
    pub currency: Option<String>,
    pub job_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub expense_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpenseRequest {
    #[validate(length(max = 255), custom = "validate_not_blank")]
    pub title: Option<String>,
    #[validate(custom = "validate_money")]
    pub amount: Option<Decimal>,
    #[validate(custom = "validate_currency_code")]
    pub currency: Option<String>,
    pub job_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub expense_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseQuery {
    pub id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
}
