//! Integration tests for Shop Catalog.
//!
//! # Running Tests
//!
//! ```bash
//! # Prepare a database and start the API
//! cargo run -p shop-catalog-cli -- migrate
//! cargo run -p shop-catalog-cli -- seed --clear
//! cargo run -p shop-catalog-api
//!
//! # Run the ignored tests against it
//! cargo test -p shop-catalog-integration-tests -- --ignored
//! ```
//!
//! Set `CATALOG_BASE_URL` to target a server other than `http://localhost:3001`.

use reqwest::Client;

/// Base URL of the API under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("CATALOG_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// URL of the categories collection.
#[must_use]
pub fn categories_url() -> String {
    format!("{}/api/categories", base_url())
}

/// URL of one category.
#[must_use]
pub fn category_url(id: impl std::fmt::Display) -> String {
    format!("{}/{id}", categories_url())
}

/// A plain HTTP client.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// A category name that will not collide with other test runs.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}
