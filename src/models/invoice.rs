//! Invoice model
//!
//! Invoices and their line items. Line items belong to exactly one invoice
//! and are deleted with it.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Maps to the `invoice_status` ENUM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Pending,
    Paid,
    Unpaid,
    Overdue,
    Cancelled,
}

/// Row of the `invoices` table
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub client_id: Uuid,
    pub job_id: Option<Uuid>,
    pub status: InvoiceStatus,
    pub currency: String,
    pub sub_total: Decimal,
    pub total: Decimal,
    pub amount_in_words: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Invoice header before a number is allocated
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub client_id: Uuid,
    pub job_id: Option<Uuid>,
    pub status: InvoiceStatus,
    pub currency: String,
    pub sub_total: Decimal,
    pub total: Decimal,
    pub amount_in_words: String,
    pub issue_date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// Row of the `invoice_line_items` table
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLineItem {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub service_item_id: Option<Uuid>,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
    pub tax_percent: Decimal,
    pub tax_amount: Decimal,
    pub billing_amount: Decimal,
    pub position: i32,
}

/// Invoice with its line items, ordered by position
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceWithItems {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub line_items: Vec<InvoiceLineItem>,
}
