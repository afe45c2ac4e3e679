//! In-memory store for handler tests.
//!
//! Mirrors the Postgres schema rules that the handlers rely on: `category_name`
//! is `NOT NULL`, `product.category_id` must reference an existing category,
//! and deleting a category unassigns its products.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use rust_decimal::Decimal;

use shop_catalog_core::{CategoryId, ProductId};

use super::{CategoryStore, ProductStore, RepositoryError};
use crate::models::{Category, CategoryChanges, CategoryWithProducts, NewCategory, Product};

#[derive(Debug, Default)]
struct Tables {
    categories: BTreeMap<CategoryId, String>,
    products: BTreeMap<ProductId, Product>,
    next_category_id: i32,
    offline: bool,
    failing_products: BTreeSet<ProductId>,
}

/// A store holding both tables behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        let tables = self.tables();
        if tables.offline {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(tables)
    }

    /// Insert a category directly, bypassing the trait.
    pub fn insert_category(&self, name: &str) -> CategoryId {
        let mut tables = self.tables();
        tables.next_category_id += 1;
        let id = CategoryId::new(tables.next_category_id);
        tables.categories.insert(id, name.to_string());
        id
    }

    /// Insert a product directly, bypassing the trait.
    pub fn insert_product(&self, id: i32, name: &str, category_id: Option<CategoryId>) -> ProductId {
        let id = ProductId::new(id);
        let mut tables = self.tables();
        tables.products.insert(
            id,
            Product {
                id,
                product_name: name.to_string(),
                price: Decimal::new(1999, 2),
                stock: 10,
                category_id,
            },
        );
        id
    }

    /// Current `category_id` of a product.
    pub fn product_category(&self, id: ProductId) -> Option<CategoryId> {
        let tables = self.tables();
        tables.products.get(&id).and_then(|p| p.category_id)
    }

    /// Current name of a category, if the row exists.
    pub fn category_name(&self, id: CategoryId) -> Option<String> {
        let tables = self.tables();
        tables.categories.get(&id).cloned()
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn set_offline(&self, offline: bool) {
        self.tables().offline = offline;
    }

    /// Make `assign_category` fail for this product only.
    pub fn fail_product(&self, id: ProductId) {
        self.tables().failing_products.insert(id);
    }
}

fn with_products(tables: &Tables, id: CategoryId, name: &str) -> CategoryWithProducts {
    let products = tables
        .products
        .values()
        .filter(|p| p.category_id == Some(id))
        .cloned()
        .collect();
    CategoryWithProducts::new(
        Category {
            id,
            category_name: name.to_string(),
        },
        products,
    )
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn find_all_with_products(&self) -> Result<Vec<CategoryWithProducts>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .categories
            .iter()
            .map(|(id, name)| with_products(&tables, *id, name))
            .collect())
    }

    async fn find_one_with_products(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryWithProducts>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .categories
            .get(&id)
            .map(|name| with_products(&tables, id, name)))
    }

    async fn find_by_primary_key(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables.categories.get(&id).map(|name| Category {
            id,
            category_name: name.clone(),
        }))
    }

    async fn create(&self, fields: NewCategory) -> Result<Category, RepositoryError> {
        let mut tables = self.lock()?;
        let Some(category_name) = fields.category_name else {
            return Err(RepositoryError::Constraint(
                "null value in column \"category_name\" violates not-null constraint".to_string(),
            ));
        };
        tables.next_category_id += 1;
        let id = CategoryId::new(tables.next_category_id);
        tables.categories.insert(id, category_name.clone());
        Ok(Category { id, category_name })
    }

    async fn update(
        &self,
        id: CategoryId,
        changes: CategoryChanges,
    ) -> Result<u64, RepositoryError> {
        let mut tables = self.lock()?;
        let Some(name) = tables.categories.get_mut(&id) else {
            return Ok(0);
        };
        match changes.category_name {
            Some(Some(category_name)) => *name = category_name,
            Some(None) => {
                return Err(RepositoryError::Constraint(
                    "null value in column \"category_name\" violates not-null constraint"
                        .to_string(),
                ));
            }
            None => {}
        }
        Ok(1)
    }

    async fn destroy(&self, id: CategoryId) -> Result<u64, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.categories.remove(&id).is_none() {
            return Ok(0);
        }
        for product in tables.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(1)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.lock().map(|_| ())
    }
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn assign_category(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<u64, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.failing_products.contains(&product_id) {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        // A missing product matches no row, so the FK is never checked.
        if !tables.products.contains_key(&product_id) {
            return Ok(0);
        }
        if !tables.categories.contains_key(&category_id) {
            return Err(RepositoryError::Constraint(format!(
                "insert or update on table \"product\" violates foreign key constraint (category {category_id})"
            )));
        }
        if let Some(product) = tables.products.get_mut(&product_id) {
            product.category_id = Some(category_id);
        }
        Ok(1)
    }
}
