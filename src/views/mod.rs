//! Server-rendered HTML views for the shop item pages.
//!
//! Pages are plain shell functions returning markup for
//! `axum::response::Html`; there is no client-side state.

use crate::models::{ItemForm, ShopItem};

/// Escape text for interpolation into HTML.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Common page frame: header, nav, flash banners, content.
fn page_shell(title: &str, notice: Option<&str>, error: Option<&str>, content: &str) -> String {
    let mut banners = String::new();
    if let Some(text) = notice {
        banners.push_str(&format!(
            "<p class=\"flash success\">{}</p>",
            escape(text)
        ));
    }
    if let Some(text) = error {
        banners.push_str(&format!("<p class=\"flash error\">{}</p>", escape(text)));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title} - Shop Inventory</title>
<style>
body {{ font-family: sans-serif; margin: 2rem auto; max-width: 56rem; color: #222; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }}
.flash.success {{ color: #1a7f37; }}
.flash.error {{ color: #b42318; }}
nav a {{ margin-right: 1rem; }}
label {{ display: block; margin-top: 0.8rem; }}
input {{ padding: 0.3rem; width: 20rem; }}
</style>
</head>
<body>
<nav><a href="/">Home</a><a href="/items">Items</a><a href="/items/new">Add New Item</a></nav>
<h1>{title}</h1>
{banners}
{content}
</body>
</html>
"#,
        title = escape(title),
        banners = banners,
        content = content,
    )
}

pub fn home_page() -> String {
    page_shell(
        "Shop Inventory",
        None,
        None,
        "<p>A small catalog of shop items.</p>\
         <p><a href=\"/items\">Browse items</a> or <a href=\"/items/new\">add a new one</a>.</p>",
    )
}

pub fn list_page(items: &[ShopItem], notice: Option<&str>, error: Option<&str>) -> String {
    let content = if items.is_empty() {
        "<p>No items available</p>".to_string()
    } else {
        let mut rows = String::new();
        for item in items {
            rows.push_str(&format!(
                "<tr><td><a href=\"/items/{id}\">{name}</a></td><td>{price}</td><td>{quantity}</td>\
                 <td><a href=\"/items/edit/{id}\">Edit</a> <a href=\"/items/delete/{id}\">Delete</a></td></tr>",
                id = escape(&item.id),
                name = escape(&item.name),
                price = item.price,
                quantity = item.quantity,
            ));
        }
        format!(
            "<table><tr><th>Name</th><th>Price</th><th>Quantity</th><th></th></tr>{}</table>",
            rows
        )
    };
    page_shell("Items", notice, error, &content)
}

pub fn detail_page(item: &ShopItem) -> String {
    let content = format!(
        "<dl>\
         <dt>Name</dt><dd>{name}</dd>\
         <dt>Description</dt><dd>{description}</dd>\
         <dt>Price</dt><dd>{price}</dd>\
         <dt>Quantity</dt><dd>{quantity}</dd>\
         </dl>\
         <p><a href=\"/items/edit/{id}\">Edit</a> <a href=\"/items\">Back to list</a></p>",
        id = escape(&item.id),
        name = escape(&item.name),
        description = escape(item.description.as_deref().unwrap_or("")),
        price = item.price,
        quantity = item.quantity,
    );
    page_shell(&item.name, None, None, &content)
}

/// Item form, used both for "Add New Item" and "Edit Item". The submitted
/// values are echoed back so a failed save keeps the user's input.
pub fn form_page(title: &str, form: &ItemForm, error: Option<&str>) -> String {
    let content = format!(
        r#"<form method="post" action="/items/save">
<input type="hidden" name="id" value="{id}">
<label>Name <input type="text" name="name" value="{name}"></label>
<label>Description <input type="text" name="description" value="{description}"></label>
<label>Price <input type="text" name="price" value="{price}"></label>
<label>Quantity <input type="text" name="quantity" value="{quantity}"></label>
<p><button type="submit">Save</button> <a href="/items">Cancel</a></p>
</form>"#,
        id = escape(&form.id),
        name = escape(&form.name),
        description = escape(&form.description),
        price = escape(&form.price),
        quantity = escape(&form.quantity),
    );
    page_shell(title, None, error, &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<b>"a" & 'b'</b>"#),
            "&lt;b&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn empty_list_page_shows_placeholder() {
        let page = list_page(&[], None, None);
        assert!(page.contains("No items available"));
    }

    #[test]
    fn item_names_are_escaped_in_the_list() {
        let items = vec![ShopItem {
            id: "1".to_string(),
            name: "<script>alert(1)</script>".to_string(),
            description: None,
            price: rust_decimal::Decimal::ZERO,
            quantity: 0,
        }];
        let page = list_page(&items, None, None);
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
