//! Command implementations for the lightbnb CLI

pub mod property;
pub mod reservations;
pub mod search;
pub mod user;

// Re-export dispatcher functions for flat access from main.rs
pub use property::{run_property, PropertyArgs};
pub use reservations::{run_reservations, ReservationsArgs};
pub use search::{run_search, SearchArgs};
pub use user::{run_user, UserArgs};

use anyhow::{Context, Result};
use lightbnb_db::{LightbnbConfig, QueryGateway};
use serde::Serialize;

/// Open the pool and verify it. Callers close the gateway when done.
pub(crate) async fn connect(config: &LightbnbConfig) -> Result<QueryGateway> {
    QueryGateway::connect(&config.database)
        .await
        .context("Failed to connect to database. Set DATABASE_URL, PG* variables, or ~/.lightbnb/config.toml")
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize result")?;
    println!("{json}");
    Ok(())
}

/// Check database connectivity
pub async fn run_ping(config: &LightbnbConfig) -> Result<()> {
    let gateway = connect(config).await?;
    gateway.close().await;
    println!("ok");
    Ok(())
}
