use crate::dto::supplier_dto::{CreateSupplierRequest, SupplierQuery, UpdateSupplierRequest};
use crate::models::supplier::Supplier;
use crate::repositories::supplier_repository::SupplierRepository;
use crate::utils::errors::{not_found_error, AppResult};
use crate::utils::validation::normalize_optional;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SupplierController {
    repository: SupplierRepository,
}

impl SupplierController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: SupplierRepository::new(pool),
        }
    }

    pub async fn list(&self, query: &SupplierQuery) -> AppResult<Vec<Supplier>> {
        let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        self.repository.list(search).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Supplier> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Supplier", id))
    }

    pub async fn create(&self, request: CreateSupplierRequest) -> AppResult<Supplier> {
        let now = Utc::now();
        let supplier = Supplier {
            id: Uuid::new_v4(),
            name: request.name.unwrap_or_default().trim().to_string(),
            contact_person: normalize_optional(request.contact_person),
            phone: normalize_optional(request.phone),
            email: normalize_optional(request.email),
            address: normalize_optional(request.address),
            tin: normalize_optional(request.tin),
            created_at: now,
            updated_at: now,
        };

        self.repository.create(&supplier).await
    }

    pub async fn update(&self, id: Uuid, request: UpdateSupplierRequest) -> AppResult<Supplier> {
        let mut supplier = self.get(id).await?;

        if let Some(name) = request.name {
            supplier.name = name.trim().to_string();
        }
        if request.contact_person.is_some() {
            supplier.contact_person = normalize_optional(request.contact_person);
        }
        if request.phone.is_some() {
            supplier.phone = normalize_optional(request.phone);
        }
        if request.email.is_some() {
            supplier.email = normalize_optional(request.email);
        }
        if request.address.is_some() {
            supplier.address = normalize_optional(request.address);
        }
        if request.tin.is_some() {
            supplier.tin = normalize_optional(request.tin);
        }

        self.repository.update(&supplier).await
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            return Err(not_found_error("Supplier", id));
        }
        Ok(())
    }
}
