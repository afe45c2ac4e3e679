//! `PostgreSQL` implementation of the catalog store.
//!
//! Queries are built with `sqlx::query_as::<_, T>` against `FromRow` types so
//! the crate builds without a live database.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use shop_catalog_core::{CategoryId, ProductId};

use super::{CategoryStore, ProductStore, RepositoryError};
use crate::models::{Category, CategoryChanges, CategoryWithProducts, NewCategory, Product};

/// Store backed by a `PostgreSQL` connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn products_for(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, product_name, price, stock, category_id
            FROM product
            WHERE category_id = ANY($1)
            ORDER BY id
            ",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn find_all_with_products(&self) -> Result<Vec<CategoryWithProducts>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, category_name
            FROM category
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = categories.iter().map(|c| c.id.as_i32()).collect();
        let mut by_category: HashMap<CategoryId, Vec<Product>> = HashMap::new();
        for product in self.products_for(&ids).await? {
            if let Some(category_id) = product.category_id {
                by_category.entry(category_id).or_default().push(product);
            }
        }

        Ok(categories
            .into_iter()
            .map(|category| {
                let products = by_category.remove(&category.id).unwrap_or_default();
                CategoryWithProducts::new(category, products)
            })
            .collect())
    }

    async fn find_one_with_products(
        &self,
        id: CategoryId,
    ) -> Result<Option<CategoryWithProducts>, RepositoryError> {
        let Some(category) = self.find_by_primary_key(id).await? else {
            return Ok(None);
        };

        let products = self.products_for(&[id.as_i32()]).await?;
        Ok(Some(CategoryWithProducts::new(category, products)))
    }

    async fn find_by_primary_key(
        &self,
        id: CategoryId,
    ) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            SELECT id, category_name
            FROM category
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(category)
    }

    async fn create(&self, fields: NewCategory) -> Result<Category, RepositoryError> {
        sqlx::query_as::<_, Category>(
            r"
            INSERT INTO category (category_name)
            VALUES ($1)
            RETURNING id, category_name
            ",
        )
        .bind(fields.category_name)
        .fetch_one(&self.pool)
        .await
        .map_err(RepositoryError::from_write)
    }

    async fn update(
        &self,
        id: CategoryId,
        changes: CategoryChanges,
    ) -> Result<u64, RepositoryError> {
        // $1 says whether the name was supplied; $2 may be NULL.
        let result = sqlx::query(
            r"
            UPDATE category
            SET category_name = CASE WHEN $1 THEN $2 ELSE category_name END
            WHERE id = $3
            ",
        )
        .bind(changes.category_name.is_some())
        .bind(changes.category_name.flatten())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(result.rows_affected())
    }

    async fn destroy(&self, id: CategoryId) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM category
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl ProductStore for PgStore {
    async fn assign_category(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE product
            SET category_id = $1
            WHERE id = $2
            ",
        )
        .bind(category_id)
        .bind(product_id)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from_write)?;

        Ok(result.rows_affected())
    }
}
