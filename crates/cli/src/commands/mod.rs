//! CLI subcommands.

pub mod migrate;
pub mod seed;

use sqlx::PgPool;

use shop_catalog_api::config::ApiConfig;
use shop_catalog_api::db;

/// Load configuration and open a small pool for a one-off command.
async fn connect() -> Result<PgPool, Box<dyn std::error::Error>> {
    let config = ApiConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, 2).await?;
    tracing::info!("Connected to database");
    Ok(pool)
}
