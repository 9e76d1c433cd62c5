use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::error;

use crate::models::{ErrorResponse, ItemDraft, ShopItem};
use crate::services::item_service::{ItemError, ItemService};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error_response(code: StatusCode, message: String) -> ApiError {
    (
        code,
        Json(ErrorResponse {
            code: code.as_u16(),
            status: code
                .canonical_reason()
                .unwrap_or("unknown")
                .to_string(),
            error: message,
        }),
    )
}

fn map_service_error(err: ItemError) -> ApiError {
    match err {
        ItemError::Invalid(reason) => {
            error_response(StatusCode::BAD_REQUEST, reason.to_string())
        }
        ItemError::Storage(cause) => {
            error!("Storage error while handling request: {}", cause);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            )
        }
    }
}

fn not_found(id: &str) -> ApiError {
    error_response(
        StatusCode::NOT_FOUND,
        format!("Item not found with id: {}", id),
    )
}

/// GET /api/items - Get all items
pub async fn get_all_items(
    State(service): State<Arc<ItemService>>,
) -> Result<Json<Vec<ShopItem>>, ApiError> {
    let items = service.get_all_items().await.map_err(map_service_error)?;
    Ok(Json(items))
}

/// GET /api/items/:id - Get item by ID
pub async fn get_item_by_id(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<String>,
) -> Result<Json<ShopItem>, ApiError> {
    match service.get_item_by_id(&id).await.map_err(map_service_error)? {
        Some(item) => Ok(Json(item)),
        None => Err(not_found(&id)),
    }
}

/// POST /api/items - Create new item
pub async fn create_item(
    State(service): State<Arc<ItemService>>,
    Json(candidate): Json<ItemDraft>,
) -> Result<(StatusCode, Json<ShopItem>), ApiError> {
    let created = service
        .insert_new_item(candidate)
        .await
        .map_err(map_service_error)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/items/:id - Update existing item
pub async fn update_item(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<String>,
    Json(candidate): Json<ItemDraft>,
) -> Result<Json<ShopItem>, ApiError> {
    // The update itself would upsert, so the not-found check lives here
    if service
        .get_item_by_id(&id)
        .await
        .map_err(map_service_error)?
        .is_none()
    {
        return Err(not_found(&id));
    }

    let updated = service
        .update_item(&id, candidate)
        .await
        .map_err(map_service_error)?;
    Ok(Json(updated))
}

/// DELETE /api/items/:id - Delete item
pub async fn delete_item(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if service
        .get_item_by_id(&id)
        .await
        .map_err(map_service_error)?
        .is_none()
    {
        return Err(not_found(&id));
    }

    service.delete_item(&id).await.map_err(map_service_error)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub name: String,
}

/// GET /api/items/search?name={name} - Search items by name
pub async fn search_items(
    State(service): State<Arc<ItemService>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<ShopItem>>, ApiError> {
    let items = service
        .search_by_name(&params.name)
        .await
        .map_err(map_service_error)?;
    Ok(Json(items))
}

#[derive(Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<i32>,
}

/// GET /api/items/low-stock?threshold={threshold} - Get low stock items
pub async fn get_low_stock_items(
    State(service): State<Arc<ItemService>>,
    Query(params): Query<LowStockParams>,
) -> Result<Json<Vec<ShopItem>>, ApiError> {
    let items = service
        .find_low_stock_items(params.threshold.unwrap_or(10))
        .await
        .map_err(map_service_error)?;
    Ok(Json(items))
}
