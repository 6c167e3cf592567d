use crate::dto::invoice_dto::{
    CreateInvoiceRequest, InvoicePreviewRequest, InvoicePreviewResponse, InvoiceQuery,
    LineItemRequest, UpdateInvoiceRequest,
};
use crate::models::invoice::{InvoiceDraft, InvoiceWithItems};
use crate::repositories::client_repository::ClientRepository;
use crate::repositories::invoice_repository::{InvoiceFilter, InvoiceRepository};
use crate::repositories::job_repository::JobRepository;
use crate::repositories::service_repository::ServiceItemRepository;
use crate::services::invoice_aggregator::{
    aggregate, build_line_items, summarize_line_items, LineItemDraft, ServiceLine,
};
use crate::services::number_to_words::number_to_words;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::{normalize_optional, MAX_MONEY};
use chrono::Utc;
use sqlx::PgPool;
use tracing::warn;
use uuid::Uuid;
use validator::Validate;

pub struct InvoiceController {
    repository: InvoiceRepository,
    clients: ClientRepository,
    jobs: JobRepository,
    services: ServiceItemRepository,
}

/// Validates each posted line item and prices it
fn line_item_drafts(items: Vec<LineItemRequest>) -> AppResult<Vec<LineItemDraft>> {
    items
        .into_iter()
        .map(|item| -> AppResult<LineItemDraft> {
            item.validate()?;
            let draft = item.into_draft();
            if draft.amount >= MAX_MONEY || draft.billing_amount >= MAX_MONEY {
                return Err(AppError::BadRequest(format!(
                    "line item \"{}\" must bill less than {}",
                    draft.description, MAX_MONEY
                )));
            }
            Ok(draft)
        })
        .collect()
}

/// Totals and line items for the invoice form; nothing is stored
pub fn preview_lines(request: InvoicePreviewRequest) -> AppResult<InvoicePreviewResponse> {
    if request.lines.is_empty() {
        return Err(AppError::BadRequest(
            "at least one line or serviceItemId is required".to_string(),
        ));
    }
    for line in &request.lines {
        line.validate()?;
    }
    let totals = aggregate(&request.lines)?;
    let line_items = build_line_items(&request.lines);
    Ok(InvoicePreviewResponse { totals, line_items })
}

impl InvoiceController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: InvoiceRepository::new(pool.clone()),
            clients: ClientRepository::new(pool.clone()),
            jobs: JobRepository::new(pool.clone()),
            services: ServiceItemRepository::new(pool),
        }
    }

    /// Catalog services are priced as they are stored
    pub async fn preview(&self, mut request: InvoicePreviewRequest) -> AppResult<InvoicePreviewResponse> {
        for id in std::mem::take(&mut request.service_item_ids) {
            let item = self
                .services
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Service {} does not exist", id)))?;
            request.lines.push(ServiceLine::from_service_item(&item));
        }
        preview_lines(request)
    }

    pub async fn list(&self, query: &InvoiceQuery) -> AppResult<Vec<InvoiceWithItems>> {
        let filter = InvoiceFilter {
            client_id: query.client_id,
            status: query.status,
        };
        self.repository.list(&filter).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<InvoiceWithItems> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Invoice", id))
    }

    async fn ensure_references(&self, client_id: Option<Uuid>, job_id: Option<Uuid>) -> AppResult<()> {
        if let Some(client_id) = client_id {
            if self.clients.find_by_id(client_id).await?.is_none() {
                return Err(AppError::BadRequest(format!("Client {} does not exist", client_id)));
            }
        }
        if let Some(job_id) = job_id {
            if self.jobs.find_by_id(job_id).await?.is_none() {
                return Err(AppError::BadRequest(format!("Job {} does not exist", job_id)));
            }
        }
        Ok(())
    }

    /// `amountInWords` is derived from `total` when the form leaves it out
    pub async fn create(&self, request: CreateInvoiceRequest) -> AppResult<InvoiceWithItems> {
        let (Some(client_id), Some(currency), Some(sub_total), Some(total), Some(items)) = (
            request.client_id,
            request.currency,
            request.sub_total,
            request.total,
            request.line_items,
        ) else {
            return Err(AppError::BadRequest(
                "clientId, currency, subTotal, total and lineItems are required".to_string(),
            ));
        };

        let items = line_item_drafts(items)?;
        self.ensure_references(Some(client_id), request.job_id).await?;

        let (computed_sub_total, _, computed_total) = summarize_line_items(&items);
        if computed_sub_total != sub_total || computed_total != total {
            warn!(
                "Invoice totals {}/{} differ from line items {}/{}",
                sub_total, total, computed_sub_total, computed_total
            );
        }

        let amount_in_words = match normalize_optional(request.amount_in_words) {
            Some(words) => words,
            None => number_to_words(total, &currency)?,
        };

        let draft = InvoiceDraft {
            client_id,
            job_id: request.job_id,
            status: request.status.unwrap_or_default(),
            currency,
            sub_total,
            total,
            amount_in_words,
            issue_date: request.issue_date.unwrap_or_else(|| Utc::now().date_naive()),
            due_date: request.due_date,
            notes: normalize_optional(request.notes),
        };

        self.repository.create(&draft, &items).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateInvoiceRequest) -> AppResult<InvoiceWithItems> {
        let InvoiceWithItems { mut invoice, .. } = self.get(id).await?;

        let new_client = request.client_id.filter(|c| *c != invoice.client_id);
        let new_job = request.job_id.filter(|j| Some(*j) != invoice.job_id);
        self.ensure_references(new_client, new_job).await?;

        let amount_changed = request.total.is_some() || request.currency.is_some();

        if let Some(client_id) = request.client_id {
            invoice.client_id = client_id;
        }
        if request.job_id.is_some() {
            invoice.job_id = request.job_id;
        }
        if let Some(status) = request.status {
            invoice.status = status;
        }
        if let Some(currency) = request.currency {
            invoice.currency = currency;
        }
        if let Some(sub_total) = request.sub_total {
            invoice.sub_total = sub_total;
        }
        if let Some(total) = request.total {
            invoice.total = total;
        }
        match normalize_optional(request.amount_in_words) {
            Some(words) => invoice.amount_in_words = words,
            None if amount_changed => {
                invoice.amount_in_words = number_to_words(invoice.total, &invoice.currency)?
            }
            None => {}
        }
        if let Some(issue_date) = request.issue_date {
            invoice.issue_date = issue_date;
        }
        if request.due_date.is_some() {
            invoice.due_date = request.due_date;
        }
        if request.notes.is_some() {
            invoice.notes = normalize_optional(request.notes);
        }

        let items = request.line_items.map(line_item_drafts).transpose()?;
        self.repository.update(&invoice, items.as_deref()).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Invoice", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_preview_groups_currencies() {
        let request: InvoicePreviewRequest = serde_json::from_value(json!({
            "lines": [
                { "description": "Air freight", "amount": 1000, "currency": "USD", "vatEnabled": true, "vatPercent": 18 },
                { "description": "Customs", "amount": 500, "currency": "USD" },
                { "description": "Local delivery", "amount": 200000, "currency": "TZS" }
            ]
        }))
        .unwrap();

        let response = preview_lines(request).unwrap();
        assert_eq!(response.totals.len(), 2);
        assert_eq!(response.line_items.len(), 3);

        let usd = response.totals.iter().find(|t| t.currency == "USD").unwrap();
        assert_eq!(usd.total, rust_decimal::Decimal::from(1680));
        assert_eq!(usd.amount_in_words, "One Thousand Six Hundred Eighty Dollars");
    }

    #[test]
    fn test_preview_rejects_negative_amounts() {
        let request: InvoicePreviewRequest = serde_json::from_value(json!({
            "lines": [{ "description": "Refund", "amount": -5, "currency": "USD" }]
        }))
        .unwrap();

        assert!(matches!(preview_lines(request), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_preview_needs_lines() {
        let request: InvoicePreviewRequest = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(preview_lines(request), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_preview_rejects_oversized_amounts() {
        let request: InvoicePreviewRequest = serde_json::from_value(json!({
            "lines": [{
                "description": "Charter",
                "amount": 5e28,
                "currency": "USD",
                "vatEnabled": true,
                "vatPercent": 18
            }]
        }))
        .unwrap();

        assert!(matches!(preview_lines(request), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_line_items_must_bill_below_limit() {
        let items: Vec<LineItemRequest> = serde_json::from_value(json!([
            { "description": "Bulk haulage", "rate": 900000000000u64, "quantity": 5 }
        ]))
        .unwrap();

        assert!(matches!(line_item_drafts(items), Err(AppError::BadRequest(_))));
    }
}
