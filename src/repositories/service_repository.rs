use crate::models::service_item::ServiceItem;
use crate::utils::errors::AppResult;
use sqlx::PgPool;
use uuid::Uuid;

pub struct ServiceItemRepository {
    pool: PgPool,
}

impl ServiceItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, item: &ServiceItem) -> AppResult<ServiceItem> {
        let result = sqlx::query_as::<_, ServiceItem>(
            r#"
            INSERT INTO service_items (
                id, name, description, price, currency, vat_enabled, vat_percent, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.currency)
        .bind(item.vat_enabled)
        .bind(item.vat_percent)
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ServiceItem>> {
        let result = sqlx::query_as::<_, ServiceItem>("SELECT * FROM service_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    pub async fn list(&self, currency: Option<&str>) -> AppResult<Vec<ServiceItem>> {
        let result = sqlx::query_as::<_, ServiceItem>(
            r#"
            SELECT * FROM service_items
            WHERE ($1::text IS NULL OR currency = $1)
            ORDER BY name ASC
            "#,
        )
        .bind(currency)
        .fetch_all(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn update(&self, item: &ServiceItem) -> AppResult<ServiceItem> {
        let result = sqlx::query_as::<_, ServiceItem>(
            r#"
            UPDATE service_items
            SET name = $2, description = $3, price = $4, currency = $5, vat_enabled = $6,
                vat_percent = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(item.id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.currency)
        .bind(item.vat_enabled)
        .bind(item.vat_percent)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM service_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
