//! CLI command definitions and dispatch.

pub mod migrate;
pub mod seed;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use roost_core::error::AppError;

/// Roost — Property Rental Marketplace API
#[derive(Debug, Parser)]
#[command(name = "roost", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run pending database migrations
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Insert demo data
    Seed(seed::SeedArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::Seed(args) => seed::execute(args, &self.config).await,
        }
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<roost_core::config::AppConfig, AppError> {
    roost_core::config::AppConfig::load(config_path)
}

/// Helper: create database pool from config
pub async fn create_db_pool(
    config: &roost_core::config::AppConfig,
) -> Result<sqlx::PgPool, AppError> {
    let pool = roost_database::connection::DatabasePool::connect(&config.database).await?;
    Ok(pool.into_pool())
}
