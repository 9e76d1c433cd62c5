use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::{ItemDraft, ShopItem, ValidItem, ValidationError};

/// Storage backend for shop items, addressed by string id.
///
/// `save` assigns a fresh id when the item carries none and replaces the
/// stored record otherwise. `delete_by_id` is idempotent.
#[async_trait]
pub trait ItemStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<ShopItem>, sqlx::Error>;
    async fn find_by_id(&self, id: &str) -> Result<Option<ShopItem>, sqlx::Error>;
    async fn save(&self, item: ValidItem) -> Result<ShopItem, sqlx::Error>;
    async fn delete_by_id(&self, id: &str) -> Result<(), sqlx::Error>;
    async fn find_by_name_containing(&self, name_part: &str) -> Result<Vec<ShopItem>, sqlx::Error>;
    async fn find_by_quantity_less_than(&self, threshold: i32)
        -> Result<Vec<ShopItem>, sqlx::Error>;
}

#[derive(Debug, Error)]
pub enum ItemError {
    /// The caller supplied an item violating a business rule. Storage is
    /// never reached in this case.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// A storage failure, passed through unchanged for the HTTP layer to
    /// translate.
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Business-rule layer over an [`ItemStore`]. Stateless between calls; every
/// operation validates and delegates.
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_items(&self) -> Result<Vec<ShopItem>, ItemError> {
        Ok(self.store.find_all().await?)
    }

    /// Absence is `Ok(None)`, never an error; the caller decides how to
    /// surface a missing item.
    pub async fn get_item_by_id(&self, id: &str) -> Result<Option<ShopItem>, ItemError> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn insert_new_item(&self, mut item: ItemDraft) -> Result<ShopItem, ItemError> {
        // Force the id to empty so storage always assigns a fresh one
        item.id = None;
        let valid = item.validate()?;
        debug!("Inserting new item '{}'", valid.name);
        Ok(self.store.save(valid).await?)
    }

    /// The path id wins over whatever id the payload carried; the write
    /// always targets the identified record. The id is not required to
    /// pre-exist, so an update of an unknown id creates a record with that
    /// id. Callers that want a not-found response check existence first.
    pub async fn update_item(&self, id: &str, mut item: ItemDraft) -> Result<ShopItem, ItemError> {
        item.id = Some(id.to_string());
        let valid = item.validate()?;
        debug!("Updating item '{}'", id);
        Ok(self.store.save(valid).await?)
    }

    /// Deleting an id that does not exist is not an error at this layer.
    pub async fn delete_item(&self, id: &str) -> Result<(), ItemError> {
        debug!("Deleting item '{}'", id);
        Ok(self.store.delete_by_id(id).await?)
    }

    /// Case-insensitive substring match over names, in storage order.
    pub async fn search_by_name(&self, name_part: &str) -> Result<Vec<ShopItem>, ItemError> {
        Ok(self.store.find_by_name_containing(name_part).await?)
    }

    /// Items with quantity strictly below the threshold, in storage order.
    pub async fn find_low_stock_items(&self, threshold: i32) -> Result<Vec<ShopItem>, ItemError> {
        Ok(self.store.find_by_quantity_less_than(threshold).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    /// Records every call so tests can assert what reached storage.
    #[derive(Default)]
    struct RecordingStore {
        saved: Mutex<Vec<ValidItem>>,
        deleted: Mutex<Vec<String>>,
        name_queries: Mutex<Vec<String>>,
        quantity_queries: Mutex<Vec<i32>>,
        items: Mutex<Vec<ShopItem>>,
    }

    impl RecordingStore {
        fn with_items(items: Vec<ShopItem>) -> Self {
            Self {
                items: Mutex::new(items),
                ..Self::default()
            }
        }

        fn saved(&self) -> Vec<ValidItem> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ItemStore for RecordingStore {
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
            self.saved.lock().unwrap().push(item.clone());
            Ok(ShopItem {
                id: item.id.unwrap_or_else(|| "generated-id".to_string()),
                name: item.name,
                description: item.description,
                price: item.price,
                quantity: item.quantity,
            })
        }

        async fn delete_by_id(&self, id: &str) -> Result<(), sqlx::Error> {
            self.deleted.lock().unwrap().push(id.to_string());
            self.items.lock().unwrap().retain(|item| item.id != id);
            Ok(())
        }

        async fn find_by_name_containing(
            &self,
            name_part: &str,
        ) -> Result<Vec<ShopItem>, sqlx::Error> {
            self.name_queries.lock().unwrap().push(name_part.to_string());
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
            self.quantity_queries.lock().unwrap().push(threshold);
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

    fn stored(id: &str, name: &str, quantity: i32) -> ShopItem {
        ShopItem {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price: dec!(10.00),
            quantity,
        }
    }

    fn laptop_draft() -> ItemDraft {
        ItemDraft {
            id: None,
            name: Some("Laptop".to_string()),
            description: Some("Gaming laptop".to_string()),
            price: Some(dec!(1500.00)),
            quantity: 5,
        }
    }

    #[tokio::test]
    async fn get_all_items_returns_everything() {
        let store = Arc::new(RecordingStore::with_items(vec![
            stored("1", "Laptop", 5),
            stored("2", "Mouse", 10),
        ]));
        let service = ItemService::new(store);

        let items = service.get_all_items().await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn get_all_items_on_empty_store_is_not_an_error() {
        let service = ItemService::new(Arc::new(RecordingStore::default()));
        assert!(service.get_all_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_item_by_id_returns_present_item() {
        let store = Arc::new(RecordingStore::with_items(vec![stored("123", "Laptop", 5)]));
        let service = ItemService::new(store);

        let item = service.get_item_by_id("123").await.unwrap();
        assert_eq!(item.unwrap().name, "Laptop");
    }

    #[tokio::test]
    async fn get_item_by_id_returns_none_for_unknown_id() {
        let service = ItemService::new(Arc::new(RecordingStore::default()));
        assert!(service.get_item_by_id("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_discards_caller_supplied_id() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        let mut candidate = laptop_draft();
        candidate.id = Some("should-be-ignored".to_string());
        let created = service.insert_new_item(candidate).await.unwrap();

        assert_eq!(store.saved()[0].id, None);
        assert_eq!(created.id, "generated-id");
        assert_eq!(created.name, "Laptop");
        assert_eq!(created.price, dec!(1500.00));
        assert_eq!(created.quantity, 5);
    }

    #[tokio::test]
    async fn insert_with_blank_name_fails_without_touching_storage() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        let mut candidate = laptop_draft();
        candidate.name = Some("   ".to_string());
        let err = service.insert_new_item(candidate).await.unwrap_err();

        assert!(matches!(
            err,
            ItemError::Invalid(ValidationError::BlankName)
        ));
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn insert_with_absent_price_fails_without_touching_storage() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        let mut candidate = laptop_draft();
        candidate.price = None;
        let err = service.insert_new_item(candidate).await.unwrap_err();

        assert_eq!(err.to_string(), "Price must be >= 0");
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn insert_with_zero_price_and_quantity_is_accepted() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        let mut candidate = laptop_draft();
        candidate.price = Some(dec!(0));
        candidate.quantity = 0;
        service.insert_new_item(candidate).await.unwrap();

        assert_eq!(store.saved().len(), 1);
    }

    #[tokio::test]
    async fn insert_with_negative_quantity_fails_without_touching_storage() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        let mut candidate = laptop_draft();
        candidate.quantity = -1;
        let err = service.insert_new_item(candidate).await.unwrap_err();

        assert_eq!(err.to_string(), "Quantity must be >= 0");
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn update_forces_the_path_id_onto_the_payload() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        let candidate = ItemDraft {
            id: Some("wrong-id".to_string()),
            name: Some("Keyboard Pro".to_string()),
            description: None,
            price: Some(dec!(120.00)),
            quantity: 5,
        };
        let updated = service.update_item("123", candidate).await.unwrap();

        assert_eq!(store.saved()[0].id.as_deref(), Some("123"));
        assert_eq!(updated.id, "123");
        assert_eq!(updated.name, "Keyboard Pro");
    }

    #[tokio::test]
    async fn update_with_invalid_payload_fails_without_touching_storage() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        let mut candidate = laptop_draft();
        candidate.name = None;
        let err = service.update_item("123", candidate).await.unwrap_err();

        assert_eq!(err.to_string(), "Name must not be blank");
        assert!(store.saved().is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_id_is_not_an_error() {
        let store = Arc::new(RecordingStore::default());
        let service = ItemService::new(store.clone());

        service.delete_item("999").await.unwrap();
        assert_eq!(store.deleted.lock().unwrap().as_slice(), ["999"]);
    }

    #[tokio::test]
    async fn search_matches_name_substrings_case_insensitively() {
        let store = Arc::new(RecordingStore::with_items(vec![
            stored("1", "Laptop", 5),
            stored("2", "Laptop Pro", 3),
            stored("3", "Mouse", 10),
        ]));
        let service = ItemService::new(store.clone());

        let found = service.search_by_name("Laptop").await.unwrap();
        let names: Vec<&str> = found.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, ["Laptop", "Laptop Pro"]);
        assert_eq!(store.name_queries.lock().unwrap().as_slice(), ["Laptop"]);
    }

    #[tokio::test]
    async fn low_stock_uses_a_strict_threshold() {
        let store = Arc::new(RecordingStore::with_items(vec![
            stored("1", "Cable", 2),
            stored("2", "Adapter", 3),
            stored("3", "Monitor", 15),
        ]));
        let service = ItemService::new(store.clone());

        let low = service.find_low_stock_items(5).await.unwrap();
        let quantities: Vec<i32> = low.iter().map(|item| item.quantity).collect();
        assert_eq!(quantities, [2, 3]);
        assert_eq!(store.quantity_queries.lock().unwrap().as_slice(), [5]);
    }
}
