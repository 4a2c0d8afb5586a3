//! User management CLI commands.

use clap::{Args, Subcommand};
use rand::{RngExt, distr::Alphanumeric};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use roost_auth::password::hasher::PasswordHasher;
use roost_core::error::AppError;
use roost_database::repositories::session::SessionRepository;
use roost_database::repositories::user::UserRepository;
use roost_entity::user::CreateUser;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Create a user with a generated temporary password
    Create {
        /// Email address
        email: String,
        /// Username
        username: String,
        /// Given name
        #[arg(long, default_value = "New")]
        first_name: String,
        /// Family name
        #[arg(long, default_value = "User")]
        last_name: String,
    },
    /// Reset a user's password and revoke their sessions
    ResetPassword {
        /// Username
        username: String,
    },
    /// Delete a user and everything they own
    Delete {
        /// Username
        username: String,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Username
    username: String,
    /// Email
    email: String,
    /// Full name
    name: String,
    /// Created at
    created_at: String,
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;
    let pool = super::create_db_pool(&config).await?;
    let user_repo = UserRepository::new(pool.clone());

    match &args.command {
        UserCommand::List => {
            let users = user_repo.find_all().await?;

            let rows: Vec<UserRow> = users
                .iter()
                .map(|u| UserRow {
                    id: u.id.to_string(),
                    username: u.username.clone(),
                    email: u.email.clone(),
                    name: u.full_name(),
                    created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();

            output::print_list(&rows, format);
        }
        UserCommand::Create {
            email,
            username,
            first_name,
            last_name,
        } => {
            let password = generate_password();
            let hash = PasswordHasher::new().hash_password(&password)?;

            let user = user_repo
                .create(&CreateUser {
                    email: email.clone(),
                    username: username.clone(),
                    first_name: first_name.clone(),
                    last_name: last_name.clone(),
                    password_hash: hash,
                })
                .await?;

            output::print_success(&format!("User '{}' created", user.username));
            output::print_kv("id", &user.id.to_string());
            output::print_kv("temporary password", &password);
        }
        UserCommand::ResetPassword { username } => {
            let user = user_repo
                .find_by_username(username)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{}' not found", username)))?;

            let confirmed = dialoguer::Confirm::new()
                .with_prompt(format!(
                    "Reset password for '{}' and revoke all their sessions?",
                    username
                ))
                .default(false)
                .interact()
                .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

            if !confirmed {
                return Ok(());
            }

            let password = generate_password();
            let hash = PasswordHasher::new().hash_password(&password)?;
            user_repo.update_password(user.id, &hash).await?;

            let revoked = SessionRepository::new(pool.clone())
                .revoke_all_for_user(user.id)
                .await?;

            output::print_success(&format!(
                "Password reset for '{}' ({} sessions revoked)",
                username, revoked
            ));
            output::print_kv("temporary password", &password);
        }
        UserCommand::Delete { username } => {
            let user = user_repo
                .find_by_username(username)
                .await?
                .ok_or_else(|| AppError::not_found(format!("User '{}' not found", username)))?;

            let confirmed = dialoguer::Confirm::new()
                .with_prompt(format!(
                    "Delete '{}' and all their spots, bookings, and reviews?",
                    username
                ))
                .default(false)
                .interact()
                .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

            if !confirmed {
                return Ok(());
            }

            user_repo.delete(user.id).await?;
            output::print_success(&format!("User '{}' deleted", username));
        }
    }

    Ok(())
}

/// Generates a random 16-character alphanumeric temporary password.
fn generate_password() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}
