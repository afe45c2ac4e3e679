//! Repository contracts for categories and products.
//!
//! The traits are object safe so the application state can hold an
//! `Arc<dyn Store>`. [`super::PgStore`] is the production backend.

use async_trait::async_trait;

use shop_catalog_core::{CategoryId, ProductId};

use super::RepositoryError;
use crate::models::{Category, CategoryChanges, CategoryWithProducts, NewCategory};

/// Persistence operations on the `category` table.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories, each with the products currently assigned to it.
    async fn find_all_with_products(&self) -> Result<Vec<CategoryWithProducts>, RepositoryError>;

    /// One category with its products, or `None` if no row matches.
    async fn find_one_with_products(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryWithProducts>, RepositoryError>;

    /// One category row by primary key, without products.
    async fn find_by_primary_key(&self, id: CategoryId)
    -> Result<Option<Category>, RepositoryError>;

    /// Insert a category and return the stored row.
    async fn create(&self, fields: NewCategory) -> Result<Category, RepositoryError>;

    /// Apply `changes` to the matching row. Returns the number of rows affected.
    async fn update(&self, id: CategoryId, changes: CategoryChanges)
    -> Result<u64, RepositoryError>;

    /// Delete the matching row. Returns the number of rows affected.
    async fn destroy(&self, id: CategoryId) -> Result<u64, RepositoryError>;

    /// Round-trip to the backend, used by the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Persistence operations on the `product` table that this service performs.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Point a product at a category. Returns the number of rows affected
    /// (0 when no product has this id).
    async fn assign_category(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<u64, RepositoryError>;
}

/// A backend serving both tables.
pub trait Store: CategoryStore + ProductStore {}

impl<T: CategoryStore + ProductStore> Store for T {}
