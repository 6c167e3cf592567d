//! Invoice persistence
//!
//! An invoice and its line items are always written together inside one
//! transaction. Updates that carry line items replace the whole set.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::info;
use uuid::Uuid;

use crate::models::invoice::{Invoice, InvoiceDraft, InvoiceLineItem, InvoiceStatus, InvoiceWithItems};
use crate::repositories::sequence_repository::allocate_number;
use crate::services::invoice_aggregator::LineItemDraft;
use crate::services::job_number::NumberSeries;
use crate::utils::errors::AppResult;

#[derive(Debug, Default, Clone)]
pub struct InvoiceFilter {
    pub client_id: Option<Uuid>,
    pub status: Option<InvoiceStatus>,
}

pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        draft: &InvoiceDraft,
        items: &[LineItemDraft],
    ) -> AppResult<InvoiceWithItems> {
        let mut tx = self.pool.begin().await?;
        let number = allocate_number(&mut tx, NumberSeries::Invoice).await?;
        let now = Utc::now();

        let invoice = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (
                id, number, client_id, job_id, status, currency, sub_total, total,
                amount_in_words, issue_date, due_date, notes, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $13)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&number)
        .bind(draft.client_id)
        .bind(draft.job_id)
        .bind(draft.status)
        .bind(&draft.currency)
        .bind(draft.sub_total)
        .bind(draft.total)
        .bind(&draft.amount_in_words)
        .bind(draft.issue_date)
        .bind(draft.due_date)
        .bind(&draft.notes)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;

        let line_items = insert_line_items(&mut tx, invoice.id, items).await?;
        tx.commit().await?;

        info!(
            "🧾 Invoice {} created with {} line items",
            invoice.number,
            line_items.len()
        );
        Ok(InvoiceWithItems {
            invoice,
            line_items,
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<InvoiceWithItems>> {
        let invoice = sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(invoice) = invoice else {
            return Ok(None);
        };

        let line_items = sqlx::query_as::<_, InvoiceLineItem>(
            "SELECT * FROM invoice_line_items WHERE invoice_id = $1 ORDER BY position ASC",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(InvoiceWithItems {
            invoice,
            line_items,
        }))
    }

    pub async fn list(&self, filter: &InvoiceFilter) -> AppResult<Vec<InvoiceWithItems>> {
        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT * FROM invoices
            WHERE ($1::uuid IS NULL OR client_id = $1)
              AND ($2::invoice_status IS NULL OR status = $2)
            ORDER BY issue_date DESC, created_at DESC
            "#,
        )
        .bind(filter.client_id)
        .bind(filter.status)
        .fetch_all(&self.pool)
        .await?;

        if invoices.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = invoices.iter().map(|i| i.id).collect();
        let items = sqlx::query_as::<_, InvoiceLineItem>(
            "SELECT * FROM invoice_line_items WHERE invoice_id = ANY($1) ORDER BY position ASC",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut grouped: HashMap<Uuid, Vec<InvoiceLineItem>> = HashMap::new();
        for item in items {
            grouped.entry(item.invoice_id).or_default().push(item);
        }

        Ok(invoices
            .into_iter()
            .map(|invoice| {
                let line_items = grouped.remove(&invoice.id).unwrap_or_default();
                InvoiceWithItems {
                    invoice,
                    line_items,
                }
            })
            .collect())
    }

    /// Updates the header; replaces the line items when `items` is given
    pub async fn update(
        &self,
        invoice: &Invoice,
        items: Option<&[LineItemDraft]>,
    ) -> AppResult<InvoiceWithItems> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET client_id = $2, job_id = $3, status = $4, currency = $5, sub_total = $6,
                total = $7, amount_in_words = $8, issue_date = $9, due_date = $10, notes = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(invoice.id)
        .bind(invoice.client_id)
        .bind(invoice.job_id)
        .bind(invoice.status)
        .bind(&invoice.currency)
        .bind(invoice.sub_total)
        .bind(invoice.total)
        .bind(&invoice.amount_in_words)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(&invoice.notes)
        .fetch_one(&mut *tx)
        .await?;

        let line_items = match items {
            Some(items) => {
                sqlx::query("DELETE FROM invoice_line_items WHERE invoice_id = $1")
                    .bind(invoice.id)
                    .execute(&mut *tx)
                    .await?;
                insert_line_items(&mut tx, invoice.id, items).await?
            }
            None => {
                sqlx::query_as::<_, InvoiceLineItem>(
                    "SELECT * FROM invoice_line_items WHERE invoice_id = $1 ORDER BY position ASC",
                )
                .bind(invoice.id)
                .fetch_all(&mut *tx)
                .await?
            }
        };

        tx.commit().await?;
        Ok(InvoiceWithItems {
            invoice: updated,
            line_items,
        })
    }

    /// Line items go with the invoice (ON DELETE CASCADE)
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

async fn insert_line_items(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    items: &[LineItemDraft],
) -> AppResult<Vec<InvoiceLineItem>> {
    let mut stored = Vec::with_capacity(items.len());

    for (position, item) in items.iter().enumerate() {
        let row = sqlx::query_as::<_, InvoiceLineItem>(
            r#"
            INSERT INTO invoice_line_items (
                id, invoice_id, service_item_id, description, quantity, rate, amount,
                tax_percent, tax_amount, billing_amount, position
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(invoice_id)
        .bind(item.service_item_id)
        .bind(&item.description)
        .bind(item.quantity)
        .bind(item.rate)
        .bind(item.amount)
        .bind(item.tax_percent)
        .bind(item.tax_amount)
        .bind(item.billing_amount)
        .bind(position as i32)
        .fetch_one(&mut **tx)
        .await?;
        stored.push(row);
    }

    Ok(stored)
}
