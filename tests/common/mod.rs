use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use rust_decimal::Decimal;

use shop_inventory::models::{ShopItem, ValidItem};
use shop_inventory::routes::{create_api_routes, create_web_routes};
use shop_inventory::services::item_service::{ItemService, ItemStore};

/// In-memory stand-in for the Postgres store, honoring the same contract:
/// `save` assigns sequential ids when none is given and replaces by id
/// otherwise, deletes are idempotent, name search is a case-insensitive
/// substring match and low-stock is a strict less-than filter.
#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<Vec<ShopItem>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn seeded(items: Vec<ShopItem>) -> Self {
        Self {
            items: Mutex::new(items),
            next_id: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl ItemStore for MemoryStore {
    async fn find_all(&self) -> Result<Vec<ShopItem>, sqlx::Error> {
        Ok(self.items.lock().unwrap().clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ShopItem>, sqlx::Error> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|item| item.id == id)
            .cloned())
    }

    async fn save(&self, item: ValidItem) -> Result<ShopItem, sqlx::Error> {
        let id = match item.id {
            Some(id) => id,
            None => format!("item-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
        };
        let saved = ShopItem {
            id: id.clone(),
            name: item.name,
            description: item.description,
            price: item.price,
            quantity: item.quantity,
        };
        let mut items = self.items.lock().unwrap();
        match items.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => *existing = saved.clone(),
            None => items.push(saved.clone()),
        }
        Ok(saved)
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), sqlx::Error> {
        self.items.lock().unwrap().retain(|item| item.id != id);
        Ok(())
    }

    async fn find_by_name_containing(&self, name_part: &str) -> Result<Vec<ShopItem>, sqlx::Error> {
        let needle = name_part.to_lowercase();
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_by_quantity_less_than(
        &self,
        threshold: i32,
    ) -> Result<Vec<ShopItem>, sqlx::Error> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|item| item.quantity < threshold)
            .cloned()
            .collect())
    }
}

pub fn item(id: &str, name: &str, price: Decimal, quantity: i32) -> ShopItem {
    ShopItem {
        id: id.to_string(),
        name: name.to_string(),
        description: None,
        price,
        quantity,
    }
}

/// The full application router (HTML pages plus /api) over a seeded
/// in-memory store.
pub fn app(items: Vec<ShopItem>) -> Router {
    let service = Arc::new(ItemService::new(Arc::new(MemoryStore::seeded(items))));
    Router::new()
        .merge(create_web_routes(service.clone()))
        .nest("/api", create_api_routes(service))
}
