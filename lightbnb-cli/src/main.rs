//! lightbnb CLI - LightBnB database access from the command line
//!
//! Thin wrapper over `lightbnb-db`: every subcommand maps to one gateway
//! operation and prints the result as JSON on stdout.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use lightbnb_db::LightbnbConfig;

mod commands;
mod tracing_setup;

use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query the LightBnB listings database",
    long_about = "Look up users, list reservations, search and add properties. \
                  Results are printed as JSON; `null` means nothing matched."
)]
struct Cli {
    /// Enable debug logging (includes generated SQL)
    #[arg(long, global = true)]
    debug: bool,

    /// Database URL (overrides config files and PG* variables)
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Config file (default: ./lightbnb.toml, then ~/.lightbnb/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the database is reachable
    Ping,
    /// Look up or create users
    User(commands::UserArgs),
    /// List a guest's reservations with property details
    Reservations(commands::ReservationsArgs),
    /// Search properties, cheapest first
    Search(commands::SearchArgs),
    /// Add properties
    Property(commands::PropertyArgs),
}

fn load_config(cli: &Cli) -> Result<LightbnbConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = LightbnbConfig::from_file(path)?;
            config
                .database
                .apply_env_overrides(|key| std::env::var(key).ok());
            config
        }
        None => LightbnbConfig::load(),
    };

    if let Some(url) = &cli.database_url {
        config.database.url = Some(url.clone());
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing so DATABASE_URL from .env reaches clap
    lightbnb_db::config::load_dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&TracingConfig { debug: cli.debug }).ok();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Ping => commands::run_ping(&config).await?,
        Commands::User(args) => commands::run_user(args, &config).await?,
        Commands::Reservations(args) => commands::run_reservations(args, &config).await?,
        Commands::Search(args) => commands::run_search(args, &config).await?,
        Commands::Property(args) => commands::run_property(args, &config).await?,
    }

    Ok(())
}
