//! Invoice aggregation
//!
//! Turns service lines into invoice line items and per-currency totals.
//! VAT on a line is `amount * vat_percent / 100` when enabled, rounded to
//! cents; totals are `sub_total + vat_total`.

use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::service_item::ServiceItem;
use crate::services::number_to_words::{number_to_words, WordsError};
use crate::utils::validation::{validate_currency_code, validate_money, validate_percent};

/// A priced service as selected on the invoice form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLine {
    pub service_item_id: Option<Uuid>,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
    #[validate(custom = "validate_money")]
    pub amount: Decimal,
    #[validate(custom = "validate_currency_code")]
    pub currency: String,
    #[serde(default)]
    pub vat_enabled: bool,
    #[serde(default)]
    #[validate(custom = "validate_percent")]
    pub vat_percent: Decimal,
}

impl ServiceLine {
    /// Prefill a line from the catalog
    pub fn from_service_item(item: &ServiceItem) -> Self {
        Self {
            service_item_id: Some(item.id),
            description: item.name.clone(),
            amount: item.price,
            currency: item.currency.clone(),
            vat_enabled: item.vat_enabled,
            vat_percent: item.vat_percent,
        }
    }

    /// VAT charged on this line, zero when disabled
    pub fn vat_amount(&self) -> Decimal {
        if !self.vat_enabled {
            return Decimal::ZERO;
        }
        round_cents(self.amount * self.vat_percent / Decimal::ONE_HUNDRED)
    }
}

/// Totals for one currency
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyTotals {
    pub currency: String,
    pub sub_total: Decimal,
    pub vat_total: Decimal,
    pub total: Decimal,
    pub amount_in_words: String,
}

/// Line item ready to be stored on an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemDraft {
    pub service_item_id: Option<Uuid>,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub tax_percent: Decimal,
    pub tax_amount: Decimal,
    pub billing_amount: Decimal,
}

impl LineItemDraft {
    /// Derive amounts from a rate and quantity
    pub fn priced(
        service_item_id: Option<Uuid>,
        description: String,
        quantity: Decimal,
        rate: Decimal,
        tax_percent: Decimal,
    ) -> Self {
        let amount = round_cents(quantity * rate);
        let tax_amount = round_cents(amount * tax_percent / Decimal::ONE_HUNDRED);
        Self {
            service_item_id,
            description,
            quantity,
            rate,
            amount,
            tax_percent,
            tax_amount,
            billing_amount: amount + tax_amount,
        }
    }
}

impl From<&ServiceLine> for LineItemDraft {
    fn from(line: &ServiceLine) -> Self {
        let tax_percent = if line.vat_enabled {
            line.vat_percent
        } else {
            Decimal::ZERO
        };
        Self::priced(
            line.service_item_id,
            line.description.clone(),
            Decimal::ONE,
            line.amount,
            tax_percent,
        )
    }
}

/// Per-currency subtotal, VAT and total, ordered by currency code
pub fn aggregate(lines: &[ServiceLine]) -> Result<Vec<CurrencyTotals>, WordsError> {
    let mut sums: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
    for line in lines {
        let entry = sums
            .entry(line.currency.to_ascii_uppercase())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        entry.0 += line.amount;
        entry.1 += line.vat_amount();
    }

    sums.into_iter()
        .map(|(currency, (sub_total, vat_total))| {
            let total = sub_total + vat_total;
            Ok(CurrencyTotals {
                amount_in_words: number_to_words(total, &currency)?,
                currency,
                sub_total,
                vat_total,
                total,
            })
        })
        .collect()
}

/// Subtotal, tax and total over stored line items
pub fn summarize_line_items(items: &[LineItemDraft]) -> (Decimal, Decimal, Decimal) {
    let sub_total: Decimal = items.iter().map(|i| i.amount).sum();
    let tax_total: Decimal = items.iter().map(|i| i.tax_amount).sum();
    (sub_total, tax_total, sub_total + tax_total)
}

pub fn build_line_items(lines: &[ServiceLine]) -> Vec<LineItemDraft> {
    lines.iter().map(LineItemDraft::from).collect()
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
