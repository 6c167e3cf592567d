use crate::dto::client_dto::{ClientQuery, CreateClientRequest, UpdateClientRequest};
use crate::models::client::Client;
use crate::repositories::client_repository::ClientRepository;
use crate::utils::errors::{not_found_error, AppError, AppResult};
use crate::utils::validation::normalize_optional;
use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

pub struct ClientController {
    repository: ClientRepository,
}

impl ClientController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: ClientRepository::new(pool),
        }
    }

    pub async fn list(&self, query: &ClientQuery) -> AppResult<Vec<Client>> {
        let search = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty());
        self.repository.list(search).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Client> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Client", id))
    }

    pub async fn create(&self, request: CreateClientRequest) -> AppResult<Client> {
        let now = Utc::now();
        let client = Client {
            id: Uuid::new_v4(),
            name: request.name.unwrap_or_default().trim().to_string(),
            address: normalize_optional(request.address),
            phone: normalize_optional(request.phone),
            tin: normalize_optional(request.tin),
            email: normalize_optional(request.email),
            created_at: now,
            updated_at: now,
        };

        let saved = self.repository.create(&client).await?;
        info!("👤 Client created: {} ({})", saved.name, saved.id);
        Ok(saved)
    }

    pub async fn update(&self, id: Uuid, request: UpdateClientRequest) -> AppResult<Client> {
        let mut client = self.get(id).await?;

        if let Some(name) = request.name {
            client.name = name.trim().to_string();
        }
        if request.address.is_some() {
            client.address = normalize_optional(request.address);
        }
        if request.phone.is_some() {
            client.phone = normalize_optional(request.phone);
        }
        if request.tin.is_some() {
            client.tin = normalize_optional(request.tin);
        }
        if request.email.is_some() {
            client.email = normalize_optional(request.email);
        }

        self.repository.update(&client).await
    }

    /// Refuses while jobs or invoices still reference the client
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.get(id).await?;

        let (jobs, invoices) = self.repository.reference_counts(id).await?;
        if jobs > 0 || invoices > 0 {
            return Err(AppError::BadRequest(format!(
                "Client is referenced by {} job(s) and {} invoice(s)",
                jobs, invoices
            )));
        }

        if !self.repository.delete(id).await? {
            return Err(not_found_error("Client", id));
        }
        info!("🗑️ Client deleted: {}", id);
        Ok(())
    }
}
