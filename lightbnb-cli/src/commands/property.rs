//! Property command - add listings from JSON
//!
//! Input is a single NewProperty object with `cost_per_night` in dollars:
//!   lightbnb property add listing.json
//!   cat listing.json | lightbnb property add -

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{LightbnbConfig, NewProperty};

use super::{connect, print_json};

#[derive(Parser, Debug)]
pub struct PropertyArgs {
    #[command(subcommand)]
    pub command: PropertyCommand,
}

#[derive(Subcommand, Debug)]
pub enum PropertyCommand {
    /// Insert a property and print the stored record
    Add {
        /// Path to a JSON property document ("-" reads stdin)
        file: PathBuf,
    },
}

fn read_new_property(path: &Path) -> Result<NewProperty> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read property from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    };

    serde_json::from_str(&contents).context("Invalid property JSON")
}

pub async fn run_property(args: PropertyArgs, config: &LightbnbConfig) -> Result<()> {
    match args.command {
        PropertyCommand::Add { file } => {
            // Parse input before touching the database
            let property = read_new_property(&file)?;
            let gateway = connect(config).await?;

            let result = gateway.create_property(&property).await;
            gateway.close().await;

            let created = result?;
            tracing::info!(id = created.id, "property created");
            print_json(&created)
        }
    }
}
