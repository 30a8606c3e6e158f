//! User command - look up and create users

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{LightbnbConfig, NewUser};

use super::{connect, print_json};

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Find a user by exact email address
    Email {
        /// Email address to look up
        email: String,
    },
    /// Find a user by id
    Id {
        /// User id
        id: i32,
    },
    /// Create a user and print the stored record
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// Email address
        #[arg(long)]
        email: String,
        /// Password (already hashed by the caller)
        #[arg(long, env = "LIGHTBNB_USER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

pub async fn run_user(args: UserArgs, config: &LightbnbConfig) -> Result<()> {
    let gateway = connect(config).await?;

    let result = match args.command {
        UserCommand::Email { email } => gateway
            .find_user_by_email(&email)
            .await
            .map(serde_json::to_value),
        UserCommand::Id { id } => gateway
            .find_user_by_id(id)
            .await
            .map(serde_json::to_value),
        UserCommand::Add {
            name,
            email,
            password,
        } => gateway
            .create_user(&NewUser {
                name,
                email,
                password,
            })
            .await
            .map(serde_json::to_value),
    };

    gateway.close().await;
    let value = result?.context("Failed to serialize user")?;
    print_json(&value)
}
