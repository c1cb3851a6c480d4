//! Migrate command - applies the schema and exits

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::{logging, storage};

/// Apply database migrations
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    let pool = storage::connect(&config.database).await?;
    storage::run_migrations(&pool).await?;

    info!("Migrations applied");
    Ok(())
}
