use utoipa::OpenApi;

use crate::models::*;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Get all items
#[utoipa::path(
    get,
    path = "/api/items",
    responses(
        (status = 200, description = "All stored items", body = Vec<ShopItem>)
    )
)]
#[allow(dead_code)]
pub async fn get_all_items_doc() {}

/// Get an item by id
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 200, description = "The item", body = ShopItem),
        (status = 404, description = "No item with that id", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn get_item_by_id_doc() {}

/// Create a new item
#[utoipa::path(
    post,
    path = "/api/items",
    request_body = ItemDraft,
    responses(
        (status = 201, description = "Item created; the id is storage-assigned", body = ShopItem),
        (status = 400, description = "Validation failed", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn create_item_doc() {}

/// Update an existing item
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item id")),
    request_body = ItemDraft,
    responses(
        (status = 200, description = "Item updated", body = ShopItem),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "No item with that id", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn update_item_doc() {}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = String, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "No item with that id", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn delete_item_doc() {}

/// Search items by name substring
#[utoipa::path(
    get,
    path = "/api/items/search",
    params(("name" = String, Query, description = "Case-insensitive name fragment")),
    responses(
        (status = 200, description = "Matching items", body = Vec<ShopItem>)
    )
)]
#[allow(dead_code)]
pub async fn search_items_doc() {}

/// Items with quantity strictly below the threshold
#[utoipa::path(
    get,
    path = "/api/items/low-stock",
    params(("threshold" = Option<i32>, Query, description = "Quantity threshold, default 10")),
    responses(
        (status = 200, description = "Low-stock items", body = Vec<ShopItem>)
    )
)]
#[allow(dead_code)]
pub async fn get_low_stock_items_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        get_all_items_doc,
        get_item_by_id_doc,
        create_item_doc,
        update_item_doc,
        delete_item_doc,
        search_items_doc,
        get_low_stock_items_doc,
    ),
    components(
        schemas(HealthResponse, ShopItem, ItemDraft, ErrorResponse)
    ),
    tags(
        (name = "items", description = "Shop item catalog endpoints")
    )
)]
pub struct ApiDoc;
