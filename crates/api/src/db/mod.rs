//! Database access for the catalog `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `category` - Product categories
//! - `product` - Products; `category_id` references `category(id)` with
//!   `ON DELETE SET NULL`
//!
//! Handlers never touch `sqlx` directly. They go through the [`CategoryStore`]
//! and [`ProductStore`] traits, implemented for Postgres by [`PgStore`].
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p shop-catalog-cli -- migrate
//! ```

pub mod postgres;
pub mod store;

#[cfg(test)]
pub mod memory;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use postgres::PgStore;
pub use store::{CategoryStore, ProductStore, Store};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Not-null, foreign-key, or check constraint rejected the write.
    #[error("invalid data: {0}")]
    Constraint(String),
}

impl RepositoryError {
    /// Classify an error returned by a write statement.
    ///
    /// Constraint violations become [`RepositoryError::Constraint`] carrying
    /// the database message; anything else stays a [`RepositoryError::Database`].
    #[must_use]
    pub fn from_write(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if matches!(
                db_err.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return Self::Constraint(db_err.message().to_owned());
            }
        }
        Self::Database(err)
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_write_keeps_non_database_errors() {
        let err = RepositoryError::from_write(sqlx::Error::RowNotFound);
        assert!(matches!(err, RepositoryError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn test_repository_error_display() {
        assert!(
            RepositoryError::Database(sqlx::Error::PoolTimedOut)
                .to_string()
                .starts_with("database error: ")
        );
        assert_eq!(
            RepositoryError::Constraint("null value in column \"category_name\"".to_string())
                .to_string(),
            "invalid data: null value in column \"category_name\""
        );
    }
}
