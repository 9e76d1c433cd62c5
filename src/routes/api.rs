use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers::{health, items};
use crate::services::item_service::ItemService;

/// Create the JSON API routes
pub fn create_api_routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/items",
            get(items::get_all_items).post(items::create_item),
        )
        // Static segments before the :id capture
        .route("/items/search", get(items::search_items))
        .route("/items/low-stock", get(items::get_low_stock_items))
        .route(
            "/items/:id",
            get(items::get_item_by_id)
                .put(items::update_item)
                .delete(items::delete_item),
        )
        .with_state(service)
}
