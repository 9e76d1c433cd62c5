use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A persisted catalog item. The id is assigned by the storage layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct ShopItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

/// Candidate item decoded from a request body, not yet validated.
///
/// Name and price stay optional here so that a missing field is reported
/// through [`ItemDraft::validate`] with a field-level message instead of a
/// generic deserialization error.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ItemDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub quantity: i32,
}

/// A draft that passed validation. This is the only shape the storage layer
/// accepts, so a partially-formed item can never reach a query.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidItem {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name must not be blank")]
    BlankName,
    #[error("Price must be >= 0")]
    NegativePrice,
    #[error("Quantity must be >= 0")]
    NegativeQuantity,
}

impl ItemDraft {
    /// Checks name, then price, then quantity; the first violation is the one
    /// reported. Both boundaries are inclusive: a zero price and a zero
    /// quantity are valid. The id and description are not inspected.
    pub fn validate(self) -> Result<ValidItem, ValidationError> {
        let name = match self.name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(ValidationError::BlankName),
        };
        let price = match self.price {
            Some(price) if price >= Decimal::ZERO => price,
            _ => return Err(ValidationError::NegativePrice),
        };
        if self.quantity < 0 {
            return Err(ValidationError::NegativeQuantity);
        }
        Ok(ValidItem {
            // An empty id means "not yet persisted", same as an absent one
            id: self.id.filter(|id| !id.is_empty()),
            name,
            description: self.description,
            price,
            quantity: self.quantity,
        })
    }
}

/// Raw fields from the HTML item form. Every field arrives as text; the
/// conversion to a typed draft happens here, before the service is involved.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub quantity: String,
}

impl ItemForm {
    /// Convert the submitted text fields into a typed draft. Empty fields
    /// become absent values; text that is present but not a number is a form
    /// error reported back to the user.
    pub fn to_draft(&self) -> Result<ItemDraft, String> {
        let price = match self.price.trim() {
            "" => None,
            raw => Some(
                raw.parse::<Decimal>()
                    .map_err(|_| format!("Price must be a number, got '{}'", raw))?,
            ),
        };
        let quantity = match self.quantity.trim() {
            "" => 0,
            raw => raw
                .parse::<i32>()
                .map_err(|_| format!("Quantity must be a whole number, got '{}'", raw))?,
        };
        Ok(ItemDraft {
            id: match self.id.trim() {
                "" => None,
                id => Some(id.to_string()),
            },
            name: match self.name.trim() {
                "" => None,
                _ => Some(self.name.clone()),
            },
            description: match self.description.as_str() {
                "" => None,
                text => Some(text.to_string()),
            },
            price,
            quantity,
        })
    }
}
