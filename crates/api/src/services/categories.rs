//! Category writes with product association.
//!
//! Create and update both end with the same step: every product listed in the
//! request is pointed at the category. The per-product updates are independent,
//! so they are issued together and joined.
//!
//! # Consistency
//!
//! No transaction spans the category write and the product updates, because
//! each product update runs on its own pooled connection. If one of them fails
//! the category write stays committed and the other updates still run to
//! completion; the first error is returned to the caller.

use futures::future::join_all;
use tracing::{debug, warn};

use shop_catalog_core::{CategoryId, ProductId};

use crate::db::{RepositoryError, Store};
use crate::models::{Category, CreateCategory, UpdateCategory};

/// Point every product in `product_ids` at `category_id`.
///
/// All updates are awaited even when some fail. Returns the number of product
/// rows changed; ids that match no product count as zero.
///
/// # Errors
///
/// Returns the first error reported by any update.
pub async fn assign_products(
    store: &dyn Store,
    category_id: CategoryId,
    product_ids: &[ProductId],
) -> Result<u64, RepositoryError> {
    if product_ids.is_empty() {
        return Ok(0);
    }

    let results = join_all(
        product_ids
            .iter()
            .map(|&product_id| store.assign_category(product_id, category_id)),
    )
    .await;

    let mut assigned = 0;
    let mut failed = 0;
    let mut first_error = None;
    for result in results {
        match result {
            Ok(rows) => assigned += rows,
            Err(e) => {
                failed += 1;
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }

    if let Some(err) = first_error {
        warn!(
            %category_id,
            requested = product_ids.len(),
            assigned,
            failed,
            error = %err,
            "product reassignment partially failed"
        );
        return Err(err);
    }

    debug!(%category_id, requested = product_ids.len(), assigned, "products reassigned");
    Ok(assigned)
}

/// Insert a category and attach the requested products to it.
///
/// Returns the row as inserted; the product list is not re-read.
///
/// # Errors
///
/// Returns an error if the insert or any product update fails.
pub async fn create(store: &dyn Store, body: CreateCategory) -> Result<Category, RepositoryError> {
    let (fields, product_ids) = body.into_parts();

    let category = store.create(fields).await?;
    assign_products(store, category.id, &product_ids).await?;

    Ok(category)
}

/// Update a category, attach the requested products, and re-read the row.
///
/// Returns `None` when no category has this id after the update.
///
/// # Errors
///
/// Returns an error if any store call fails.
pub async fn update(
    store: &dyn Store,
    id: CategoryId,
    body: UpdateCategory,
) -> Result<Option<Category>, RepositoryError> {
    let (changes, product_ids) = body.into_parts();

    if !changes.is_empty() {
        let rows = store.update(id, changes).await?;
        debug!(%id, rows, "category updated");
    }
    assign_products(store, id, &product_ids).await?;

    store.find_by_primary_key(id).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    #[tokio::test]
    async fn test_create_assigns_listed_products() {
        let store = MemoryStore::new();
        let p1 = store.insert_product(1, "Plain T-Shirt", None);
        let p2 = store.insert_product(2, "Running Sneakers", None);
        let untouched = store.insert_product(3, "Branded Baseball Hat", None);

        let category = create(
            &store,
            CreateCategory {
                category_name: Some("Shirts".to_string()),
                product_ids: Some(vec![p1, p2]),
            },
        )
        .await
        .unwrap();

        assert_eq!(category.category_name, "Shirts");
        assert_eq!(store.product_category(p1), Some(category.id));
        assert_eq!(store.product_category(p2), Some(category.id));
        assert_eq!(store.product_category(untouched), None);
    }

    #[tokio::test]
    async fn test_create_without_name_is_rejected_by_store() {
        let store = MemoryStore::new();
        let err = create(&store, CreateCategory::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_assign_products_counts_missing_ids_as_zero() {
        let store = MemoryStore::new();
        let category = store.insert_category("Hats");
        let p1 = store.insert_product(1, "Branded Baseball Hat", None);

        let assigned = assign_products(&store, category, &[p1, ProductId::new(404)])
            .await
            .unwrap();
        assert_eq!(assigned, 1);
    }

    #[tokio::test]
    async fn test_assign_products_to_missing_category_fails() {
        let store = MemoryStore::new();
        let p1 = store.insert_product(1, "Top 40 Music Compilation Vinyl Record", None);

        let err = assign_products(&store, CategoryId::new(99), &[p1])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
        assert_eq!(store.product_category(p1), None);
    }

    #[tokio::test]
    async fn test_assign_missing_product_to_missing_category_is_zero() {
        let store = MemoryStore::new();

        let assigned = assign_products(&store, CategoryId::new(99), &[ProductId::new(404)])
            .await
            .unwrap();
        assert_eq!(assigned, 0);
    }

    #[tokio::test]
    async fn test_assign_products_finishes_batch_after_failure() {
        let store = MemoryStore::new();
        let music = store.insert_category("Music");
        let p1 = store.insert_product(1, "Vinyl Record", None);
        let p2 = store.insert_product(2, "Cassette", None);
        let p3 = store.insert_product(3, "Compact Disc", None);
        store.fail_product(p2);

        let err = assign_products(&store, music, &[p1, p2, p3])
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::Database(_)));
        assert_eq!(store.product_category(p1), Some(music));
        assert_eq!(store.product_category(p2), None);
        assert_eq!(store.product_category(p3), Some(music));
    }

    #[tokio::test]
    async fn test_update_with_null_name_is_rejected_by_store() {
        let store = MemoryStore::new();
        let shirts = store.insert_category("Shirts");

        let err = update(
            &store,
            shirts,
            UpdateCategory {
                category_name: Some(None),
                product_ids: None,
            },
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RepositoryError::Constraint(_)));
        assert_eq!(store.category_name(shirts).as_deref(), Some("Shirts"));
    }

    #[tokio::test]
    async fn test_update_renames_and_reassigns() {
        let store = MemoryStore::new();
        let shirts = store.insert_category("Shirts");
        let shorts = store.insert_category("Shorts");
        let p1 = store.insert_product(1, "Cargo Shorts", Some(shirts));

        let updated = update(
            &store,
            shorts,
            UpdateCategory {
                category_name: Some(Some("Summer Shorts".to_string())),
                product_ids: Some(vec![p1]),
            },
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(updated.id, shorts);
        assert_eq!(updated.category_name, "Summer Shorts");
        assert_eq!(store.product_category(p1), Some(shorts));
    }

    #[tokio::test]
    async fn test_update_missing_category_returns_none() {
        let store = MemoryStore::new();
        let result = update(
            &store,
            CategoryId::new(5),
            UpdateCategory {
                category_name: Some(Some("X".to_string())),
                product_ids: None,
            },
        )
        .await
        .unwrap();
        assert!(result.is_none());
    }
}
