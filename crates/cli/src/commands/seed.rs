//! Seed the catalog with demo categories and products.
//!
//! Runs in a single transaction: either every row lands or none do.

use std::collections::HashMap;

use rust_decimal::Decimal;

use shop_catalog_core::CategoryId;

/// Demo categories, in insertion order.
pub const CATEGORIES: &[&str] = &["Shirts", "Shorts", "Music", "Hats", "Shoes"];

/// A demo product and the name of the category it belongs to.
#[derive(Debug, Clone, Copy)]
pub struct SeedProduct {
    pub name: &'static str,
    /// Price in cents.
    pub price_cents: i64,
    pub stock: i32,
    pub category: &'static str,
}

impl SeedProduct {
    /// Price as a two-decimal amount.
    #[must_use]
    pub fn price(&self) -> Decimal {
        Decimal::new(self.price_cents, 2)
    }
}

/// Demo products.
pub const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Plain T-Shirt",
        price_cents: 1499,
        stock: 14,
        category: "Shirts",
    },
    SeedProduct {
        name: "Running Sneakers",
        price_cents: 9000,
        stock: 25,
        category: "Shoes",
    },
    SeedProduct {
        name: "Branded Baseball Hat",
        price_cents: 2299,
        stock: 12,
        category: "Hats",
    },
    SeedProduct {
        name: "Top 40 Music Compilation Vinyl Record",
        price_cents: 1299,
        stock: 50,
        category: "Music",
    },
    SeedProduct {
        name: "Cargo Shorts",
        price_cents: 2999,
        stock: 22,
        category: "Shorts",
    },
];

/// Insert the demo data.
///
/// # Arguments
///
/// * `clear` - Delete all products and categories first
///
/// # Errors
///
/// Returns an error if the database is unreachable or any insert fails.
pub async fn run(clear: bool) -> Result<(), Box<dyn std::error::Error>> {
    let pool = super::connect().await?;
    let mut tx = pool.begin().await?;

    if clear {
        let products = sqlx::query("DELETE FROM product").execute(&mut *tx).await?;
        let categories = sqlx::query("DELETE FROM category").execute(&mut *tx).await?;
        tracing::info!(
            products = products.rows_affected(),
            categories = categories.rows_affected(),
            "Cleared existing rows"
        );
    }

    let mut category_ids: HashMap<&str, CategoryId> = HashMap::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let id: CategoryId = sqlx::query_scalar(
            r"
            INSERT INTO category (category_name)
            VALUES ($1)
            RETURNING id
            ",
        )
        .bind(*name)
        .fetch_one(&mut *tx)
        .await?;
        category_ids.insert(*name, id);
    }

    for product in PRODUCTS {
        let category_id = category_ids
            .get(product.category)
            .copied()
            .ok_or_else(|| format!("unknown seed category: {}", product.category))?;

        sqlx::query(
            r"
            INSERT INTO product (product_name, price, stock, category_id)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(product.name)
        .bind(product.price())
        .bind(product.stock)
        .bind(category_id)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::info!("Seeding complete!");
    tracing::info!("  Categories inserted: {}", CATEGORIES.len());
    tracing::info!("  Products inserted: {}", PRODUCTS.len());
    Ok(())
}
