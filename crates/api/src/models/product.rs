//! Product domain types.
//!
//! Products are managed outside this service; the API only reads them as part
//! of a category and reassigns their `category_id`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shop_catalog_core::{CategoryId, ProductId};

/// A product row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Display name.
    pub product_name: String,
    /// Unit price (serialized as a decimal string).
    pub price: Decimal,
    /// Units in stock.
    pub stock: i32,
    /// Owning category, if assigned.
    pub category_id: Option<CategoryId>,
}
