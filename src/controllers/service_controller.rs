use crate::dto::service_dto::{CreateServiceItemRequest, ServiceItemQuery, UpdateServiceItemRequest};
use crate::models::service_item::ServiceItem;
use crate::repositories::service_repository::ServiceItemRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::normalize_optional;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ServiceItemController {
    repository: ServiceItemRepository,
    default_vat_percent: Decimal,
}

impl ServiceItemController {
    pub fn new(pool: PgPool, default_vat_percent: Decimal) -> Self {
        Self {
            repository: ServiceItemRepository::new(pool),
            default_vat_percent,
        }
    }

    pub async fn list(&self, query: &ServiceItemQuery) -> AppResult<Vec<ServiceItem>> {
        let currency = query
            .currency
            .as_deref()
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty());
        self.repository.list(currency.as_deref()).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<ServiceItem> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Service", id))
    }

    /// `vatPercent` falls back to the configured default
    pub async fn create(&self, request: CreateServiceItemRequest) -> AppResult<ServiceItem> {
        let now = Utc::now();
        let item = ServiceItem {
            id: Uuid::new_v4(),
            name: request.name.unwrap_or_default().trim().to_string(),
            description: normalize_optional(request.description),
            price: request.price.unwrap_or_default(),
            currency: request.currency.unwrap_or_default(),
            vat_enabled: request.vat_enabled.unwrap_or(false),
            vat_percent: request.vat_percent.unwrap_or(self.default_vat_percent),
            created_at: now,
            updated_at: now,
        };

        self.repository.create(&item).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateServiceItemRequest) -> AppResult<ServiceItem> {
        let mut item = self.get(id).await?;

        if let Some(name) = request.name {
            item.name = name.trim().to_string();
        }
        if request.description.is_some() {
            item.description = normalize_optional(request.description);
        }
        if let Some(price) = request.price {
            item.price = price;
        }
        if let Some(currency) = request.currency {
            item.currency = currency;
        }
        if let Some(vat_enabled) = request.vat_enabled {
            item.vat_enabled = vat_enabled;
        }
        if let Some(vat_percent) = request.vat_percent {
            item.vat_percent = vat_percent;
        }

        self.repository.update(&item).await
    }

    /// Line items that used the service keep their copy (FK set to NULL)
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Service", id));
        }
        Ok(())
    }
}
