//! Category route handlers.
//!
//! Reads and deletes report store failures as 500. Creates and updates report
//! them as 400, since a failed write is almost always caused by the request
//! (missing name, unknown category for a product, and so on).

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use shop_catalog_core::CategoryId;

use crate::error::{AppError, Result};
use crate::models::{Category, CategoryWithProducts, CreateCategory, UpdateCategory};
use crate::services::categories as service;
use crate::state::AppState;

/// List all categories with their products.
///
/// # Errors
///
/// Returns 500 if the store query fails.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<CategoryWithProducts>>> {
    let categories = state.store().find_all_with_products().await?;
    Ok(Json(categories))
}

/// Show one category with its products.
///
/// An id that is not an integer cannot match a row, so it is reported the
/// same way as a missing category.
///
/// # Errors
///
/// Returns 404 if no category matches, 500 if the store query fails.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CategoryWithProducts>> {
    let id = id
        .parse::<CategoryId>()
        .map_err(|_| AppError::category_not_found())?;

    state
        .store()
        .find_one_with_products(id)
        .await?
        .map(Json)
        .ok_or_else(AppError::category_not_found)
}

/// Create a category, then point the listed products at it.
///
/// Responds with the inserted row; products are not re-read.
///
/// # Errors
///
/// Returns 400 if the body is malformed or any write fails.
pub async fn create(
    State(state): State<AppState>,
    body: std::result::Result<Json<CreateCategory>, JsonRejection>,
) -> Result<Json<Category>> {
    let Json(body) = body?;

    let category = service::create(state.store(), body)
        .await
        .map_err(AppError::Rejected)?;

    tracing::info!(category_id = %category.id, "Category created");
    Ok(Json(category))
}

/// Update a category, point the listed products at it, and return the row.
///
/// The body is `null` when no category has this id.
///
/// # Errors
///
/// Returns 400 if the id or body is malformed or any write fails.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: std::result::Result<Json<UpdateCategory>, JsonRejection>,
) -> Result<Json<Option<Category>>> {
    let id = id
        .parse::<CategoryId>()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let Json(body) = body?;

    let category = service::update(state.store(), id, body)
        .await
        .map_err(AppError::Rejected)?;

    tracing::info!(category_id = %id, found = category.is_some(), "Category updated");
    Ok(Json(category))
}

/// Delete a category. Responds with the number of rows removed.
///
/// # Errors
///
/// Returns 404 if no category matches, 500 if the store call fails.
pub async fn destroy(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<u64>> {
    let id = id
        .parse::<CategoryId>()
        .map_err(|_| AppError::category_not_found())?;

    let deleted = state.store().destroy(id).await?;
    if deleted == 0 {
        return Err(AppError::category_not_found());
    }

    tracing::info!(category_id = %id, "Category deleted");
    Ok(Json(deleted))
}
