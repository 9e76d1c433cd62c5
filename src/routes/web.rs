use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::services::item_service::ItemService;

/// Create the server-rendered HTML routes
pub fn create_web_routes(service: Arc<ItemService>) -> Router {
    Router::new()
        .route("/", get(pages::home))
        .route("/items", get(pages::list_items))
        .route("/items/new", get(pages::new_item_form))
        .route("/items/save", post(pages::save_item))
        .route("/items/edit/:id", get(pages::edit_item_form))
        .route("/items/delete/:id", get(pages::delete_item))
        .route("/items/:id", get(pages::view_item))
        .with_state(service)
}
