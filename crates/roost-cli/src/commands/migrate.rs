//! Database migration CLI command.

use clap::Args;

use crate::output;
use roost_core::error::AppError;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {}

/// Execute the migrate command
pub async fn execute(_args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;

    roost_database::migration::run_migrations(&pool).await?;

    output::print_success("Migrations applied");
    Ok(())
}
