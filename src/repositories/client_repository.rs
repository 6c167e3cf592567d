use crate::models::client::Client;
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ClientRepository {
    pool: PgPool,
}

impl ClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, client: &Client) -> AppResult<Client> {
        let result = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (id, name, address, phone, tin, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.address)
        .bind(&client.phone)
        .bind(&client.tin)
        .bind(&client.email)
        .bind(client.created_at)
        .bind(client.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Client>> {
        let result = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list(&self, search: Option<&str>) -> AppResult<Vec<Client>> {
        let result = sqlx::query_as::<_, Client>(
            r#"
            SELECT * FROM clients
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
            ORDER BY name ASC
            "#,
        )
        .bind(search)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(&self, client: &Client) -> AppResult<Client> {
        let result = sqlx::query_as::<_, Client>(
            r#"
            UPDATE clients
            SET name = $2, address = $3, phone = $4, tin = $5, email = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(client.id)
        .bind(&client.name)
        .bind(&client.address)
        .bind(&client.phone)
        .bind(&client.tin)
        .bind(&client.email)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Returns false when nothing was deleted
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Jobs and invoices that still point at the client
    pub async fn reference_counts(&self, id: Uuid) -> AppResult<(i64, i64)> {
        let counts: (i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM jobs WHERE client_id = $1),
                (SELECT COUNT(*) FROM invoices WHERE client_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }
}
