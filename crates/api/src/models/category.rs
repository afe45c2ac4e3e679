//! Category domain types.

use serde::{Deserialize, Deserializer, Serialize};

use shop_catalog_core::{CategoryId, ProductId};

use super::Product;

/// A category row, without its products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID (assigned by the store).
    pub id: CategoryId,
    /// Category display name.
    pub category_name: String,
}

/// A category together with the products currently pointing at it.
///
/// Serializes flat: `{"id": .., "category_name": .., "products": [..]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

impl CategoryWithProducts {
    /// Pair a category with its products.
    #[must_use]
    pub const fn new(category: Category, products: Vec<Product>) -> Self {
        Self { category, products }
    }
}

/// Fields for inserting a category.
///
/// The name is optional on purpose: a missing name reaches the store and is
/// rejected by its `NOT NULL` constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewCategory {
    pub category_name: Option<String>,
}

/// Whitelisted fields an update may change.
///
/// The outer `None` leaves the column as is. `Some(None)` writes `NULL`, which
/// the store rejects for `category_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryChanges {
    pub category_name: Option<Option<String>>,
}

impl CategoryChanges {
    /// Whether this change set touches no columns.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.category_name.is_none()
    }
}

/// Request body for `POST /api/categories`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategory {
    pub category_name: Option<String>,
    #[serde(default)]
    pub product_ids: Option<Vec<ProductId>>,
}

impl CreateCategory {
    /// Split into the row to insert and the products to reassign.
    #[must_use]
    pub fn into_parts(self) -> (NewCategory, Vec<ProductId>) {
        (
            NewCategory {
                category_name: self.category_name,
            },
            self.product_ids.unwrap_or_default(),
        )
    }
}

/// Request body for `PUT /api/categories/{id}`.
///
/// Unknown keys are rejected so a client cannot target arbitrary columns.
/// An absent `category_name` and an explicit `null` are kept apart.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateCategory {
    #[serde(default, deserialize_with = "present")]
    pub category_name: Option<Option<String>>,
    #[serde(default)]
    pub product_ids: Option<Vec<ProductId>>,
}

impl UpdateCategory {
    /// Split into the column changes and the products to reassign.
    #[must_use]
    pub fn into_parts(self) -> (CategoryChanges, Vec<ProductId>) {
        (
            CategoryChanges {
                category_name: self.category_name,
            },
            self.product_ids.unwrap_or_default(),
        )
    }
}

/// Wrap any value that is present in the body, `null` included, in `Some`.
///
/// Paired with `#[serde(default)]`, a missing key stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
