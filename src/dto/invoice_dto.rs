use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::invoice::InvoiceStatus;
use crate::services::invoice_aggregator::{CurrencyTotals, LineItemDraft, ServiceLine};
use crate::utils::validation::{
    validate_currency_code, validate_money, validate_not_blank, validate_percent,
    validate_quantity,
};

/// Line item as posted by the invoice form. Missing derived amounts are
/// computed from `rate`, `quantity` and `taxPercent`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    pub service_item_id: Option<Uuid>,
    #[validate(length(min = 1, max = 500), custom = "validate_not_blank")]
    pub description: String,
    #[validate(custom = "validate_quantity")]
    pub quantity: Option<Decimal>,
    #[validate(custom = "validate_money")]
    pub rate: Decimal,
    #[validate(custom = "validate_money")]
    pub amount: Option<Decimal>,
    #[validate(custom = "validate_percent")]
    pub tax_percent: Option<Decimal>,
    #[validate(custom = "validate_money")]
    pub tax_amount: Option<Decimal>,
    #[validate(custom = "validate_money")]
    pub billing_amount: Option<Decimal>,
}

impl LineItemRequest {
    /// Client-supplied amounts win; gaps are filled from the rate
    pub fn into_draft(self) -> LineItemDraft {
        let computed = LineItemDraft::priced(
            self.service_item_id,
            self.description,
            self.quantity.unwrap_or(Decimal::ONE),
            self.rate,
            self.tax_percent.unwrap_or_default(),
        );
        let amount = self.amount.unwrap_or(computed.amount);
        let tax_amount = self.tax_amount.unwrap_or(computed.tax_amount);
        LineItemDraft {
            amount,
            tax_amount,
            billing_amount: self.billing_amount.unwrap_or(amount + tax_amount),
            ..computed
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceRequest {
    #[validate(required)]
    pub client_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
    #[validate(required, custom = "validate_currency_code")]
    pub currency: Option<String>,
    #[validate(required, custom = "validate_money")]
    pub sub_total: Option<Decimal>,
    #[validate(required, custom = "validate_money")]
    pub total: Option<Decimal>,
    /// Filled from `total` and `currency` when absent
    #[validate(length(max = 1000))]
    pub amount_in_words: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(required, length(min = 1))]
    pub line_items: Option<Vec<LineItemRequest>>,
}

/// Partial update; `lineItems`, when present, replaces every line item
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInvoiceRequest {
    pub client_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
    #[validate(custom = "validate_currency_code")]
    pub currency: Option<String>,
    #[validate(custom = "validate_money")]
    pub sub_total: Option<Decimal>,
    #[validate(custom = "validate_money")]
    pub total: Option<Decimal>,
    #[validate(length(max = 1000))]
    pub amount_in_words: Option<String>,
    pub issue_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
    #[validate(length(min = 1))]
    pub line_items: Option<Vec<LineItemRequest>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceQuery {
    pub id: Option<Uuid>,
    pub client_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
}

/// Lines typed on the form plus catalog services picked by id
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePreviewRequest {
    #[serde(default)]
    pub lines: Vec<ServiceLine>,
    #[serde(default)]
    pub service_item_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePreviewResponse {
    pub totals: Vec<CurrencyTotals>,
    pub line_items: Vec<LineItemDraft>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_missing_total_fails_validation() {
        let request: CreateInvoiceRequest = serde_json::from_value(json!({
            "clientId": "5f1d7a52-3c4e-4b5f-9a0e-2d6c8b7e1f00",
            "currency": "USD",
            "subTotal": 100,
            "lineItems": [{ "description": "Freight", "rate": 100 }]
        }))
        .unwrap();

        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("total"));
    }

    #[test]
    fn test_empty_line_items_fail_validation() {
        let request: CreateInvoiceRequest = serde_json::from_value(json!({
            "clientId": "5f1d7a52-3c4e-4b5f-9a0e-2d6c8b7e1f00",
            "currency": "USD",
            "subTotal": 0,
            "total": 0,
            "lineItems": []
        }))
        .unwrap();

        assert!(request.validate().unwrap_err().field_errors().contains_key("line_items"));
    }

    #[test]
    fn test_line_item_fills_missing_amounts() {
        let item: LineItemRequest = serde_json::from_value(json!({
            "description": "Handling",
            "rate": 250,
            "quantity": 2,
            "taxPercent": 18
        }))
        .unwrap();
        let draft = item.into_draft();

        assert_eq!(draft.amount, dec("500"));
        assert_eq!(draft.tax_amount, dec("90"));
        assert_eq!(draft.billing_amount, dec("590"));
    }

    #[test]
    fn test_line_item_keeps_client_amounts() {
        let item: LineItemRequest = serde_json::from_value(json!({
            "description": "Handling",
            "rate": 250,
            "amount": 240,
            "taxAmount": 0
        }))
        .unwrap();
        let draft = item.into_draft();

        assert_eq!(draft.amount, dec("240"));
        assert_eq!(draft.billing_amount, dec("240"));
    }
}
