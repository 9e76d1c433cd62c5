use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;
use tracing::error;

use crate::models::{ItemForm, ShopItem};
use crate::services::item_service::{ItemError, ItemService};
use crate::views;

/// Flash codes carried across a redirect as query parameters. Codes instead
/// of free text keep the URLs clean and the values trusted.
#[derive(Debug, Default, Deserialize)]
pub struct Flash {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl Flash {
    fn notice_text(&self) -> Option<&'static str> {
        match self.success.as_deref() {
            Some("created") => Some("Item created successfully!"),
            Some("updated") => Some("Item updated successfully!"),
            Some("deleted") => Some("Item deleted successfully!"),
            _ => None,
        }
    }

    fn error_text(&self) -> Option<&'static str> {
        match self.error.as_deref() {
            Some("not-found") => Some("Item not found"),
            Some("storage") => Some("Something went wrong, please try again"),
            _ => None,
        }
    }
}

fn form_values(item: &ShopItem) -> ItemForm {
    ItemForm {
        id: item.id.clone(),
        name: item.name.clone(),
        description: item.description.clone().unwrap_or_default(),
        price: item.price.to_string(),
        quantity: item.quantity.to_string(),
    }
}

/// GET / - Home page
pub async fn home() -> Html<String> {
    Html(views::home_page())
}

/// GET /items - List of all items
pub async fn list_items(
    State(service): State<Arc<ItemService>>,
    Query(flash): Query<Flash>,
) -> Html<String> {
    match service.get_all_items().await {
        Ok(items) => Html(views::list_page(
            &items,
            flash.notice_text(),
            flash.error_text(),
        )),
        Err(cause) => {
            error!("Failed to load item list: {}", cause);
            Html(views::list_page(
                &[],
                None,
                Some("Something went wrong, please try again"),
            ))
        }
    }
}

/// GET /items/new - Form for creating a new item
pub async fn new_item_form() -> Html<String> {
    Html(views::form_page("Add New Item", &ItemForm::default(), None))
}

/// GET /items/:id - Item details
pub async fn view_item(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get_item_by_id(&id).await {
        Ok(Some(item)) => Html(views::detail_page(&item)).into_response(),
        Ok(None) => Redirect::to("/items?error=not-found").into_response(),
        Err(cause) => {
            error!("Failed to load item '{}': {}", id, cause);
            Redirect::to("/items?error=storage").into_response()
        }
    }
}

/// GET /items/edit/:id - Form for editing an existing item
pub async fn edit_item_form(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<String>,
) -> Response {
    match service.get_item_by_id(&id).await {
        Ok(Some(item)) => {
            Html(views::form_page("Edit Item", &form_values(&item), None)).into_response()
        }
        Ok(None) => Redirect::to("/items?error=not-found").into_response(),
        Err(cause) => {
            error!("Failed to load item '{}' for editing: {}", id, cause);
            Redirect::to("/items?error=storage").into_response()
        }
    }
}

/// POST /items/save - Save a new or updated item. An empty id means insert,
/// anything else updates the identified record. Validation problems
/// re-render the form with the submitted values and a message.
pub async fn save_item(
    State(service): State<Arc<ItemService>>,
    Form(form): Form<ItemForm>,
) -> Response {
    let is_new = form.id.trim().is_empty();
    let title = if is_new { "Add New Item" } else { "Edit Item" };

    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(message) => {
            return Html(views::form_page(title, &form, Some(&message))).into_response()
        }
    };

    let saved = if is_new {
        service.insert_new_item(draft).await
    } else {
        service.update_item(form.id.trim(), draft).await
    };

    match saved {
        Ok(_) if is_new => Redirect::to("/items?success=created").into_response(),
        Ok(_) => Redirect::to("/items?success=updated").into_response(),
        Err(ItemError::Invalid(reason)) => {
            Html(views::form_page(title, &form, Some(&reason.to_string()))).into_response()
        }
        Err(ItemError::Storage(cause)) => {
            error!("Failed to save item: {}", cause);
            Html(views::form_page(
                title,
                &form,
                Some("Error saving item, please try again"),
            ))
            .into_response()
        }
    }
}

/// GET /items/delete/:id - Delete an item and return to the list
pub async fn delete_item(
    State(service): State<Arc<ItemService>>,
    Path(id): Path<String>,
) -> Redirect {
    match service.get_item_by_id(&id).await {
        Ok(Some(_)) => match service.delete_item(&id).await {
            Ok(()) => Redirect::to("/items?success=deleted"),
            Err(cause) => {
                error!("Failed to delete item '{}': {}", id, cause);
                Redirect::to("/items?error=storage")
            }
        },
        Ok(None) => Redirect::to("/items?error=not-found"),
        Err(cause) => {
            error!("Failed to check item '{}' before delete: {}", id, cause);
            Redirect::to("/items?error=storage")
        }
    }
}
