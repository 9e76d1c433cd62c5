use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Error as SqlxError;
use tracing::info;
use uuid::Uuid;

use crate::models::{ShopItem, ValidItem};
use crate::services::item_service::ItemStore;

const ITEM_COLUMNS: &str = "id, name, description, price, quantity";

/// Postgres-backed item store.
pub struct DbShop {
    pool: PgPool,
}

impl DbShop {
    /// Create a connection pool and make sure the items table exists.
    ///
    /// # Arguments
    /// * `database_url` - PostgreSQL connection string
    pub async fn connect(database_url: &str) -> Result<Self, SqlxError> {
        info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(20)
            .min_connections(2) // Keep some connections alive
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600)) // Close idle connections after 10 minutes
            .max_lifetime(Duration::from_secs(1800)) // Recycle connections after 30 minutes
            .connect(database_url)
            .await?;

        info!("Database connection pool created successfully");

        let db = Self { pool };
        db.ensure_schema().await?;
        Ok(db)
    }

    async fn ensure_schema(&self) -> Result<(), SqlxError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS shop_items (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                price NUMERIC(19, 4) NOT NULL,
                quantity INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl ItemStore for DbShop {
    async fn find_all(&self) -> Result<Vec<ShopItem>, SqlxError> {
        sqlx::query_as::<_, ShopItem>(&format!("SELECT {ITEM_COLUMNS} FROM shop_items"))
            .fetch_all(&self.pool)
            .await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShopItem>, SqlxError> {
        sqlx::query_as::<_, ShopItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM shop_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    /// Upsert keyed by id. A fresh uuid is assigned when the item carries no
    /// id; an unknown id creates a record with exactly that id.
    async fn save(&self, item: ValidItem) -> Result<ShopItem, SqlxError> {
        let id = match item.id {
            Some(id) => id,
            None => Uuid::new_v4().to_string(),
        };

        sqlx::query_as::<_, ShopItem>(&format!(
            r#"
            INSERT INTO shop_items (id, name, description, price, quantity)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                price = EXCLUDED.price,
                quantity = EXCLUDED.quantity
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(&id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(item.quantity)
        .fetch_one(&self.pool)
        .await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), SqlxError> {
        sqlx::query("DELETE FROM shop_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn find_by_name_containing(&self, name_part: &str) -> Result<Vec<ShopItem>, SqlxError> {
        sqlx::query_as::<_, ShopItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM shop_items WHERE name ILIKE '%' || $1 || '%'"
        ))
        .bind(name_part)
        .fetch_all(&self.pool)
        .await
    }

    async fn find_by_quantity_less_than(
        &self,
        threshold: i32,
    ) -> Result<Vec<ShopItem>, SqlxError> {
        sqlx::query_as::<_, ShopItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM shop_items WHERE quantity < $1"
        ))
        .bind(threshold)
        .fetch_all(&self.pool)
        .await
    }
}
