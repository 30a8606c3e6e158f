//! Search command - filtered property search

use anyhow::Result;
use clap::Parser;
use lightbnb_db::models::to_minor_units;
use lightbnb_db::{LightbnbConfig, PropertyFilter};

use super::{connect, print_json};

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Only properties owned by this user id
    #[arg(long)]
    pub owner_id: Option<i32>,

    /// City name substring (case-sensitive)
    #[arg(long)]
    pub city: Option<String>,

    /// Minimum nightly price in dollars (inclusive)
    #[arg(long, value_name = "DOLLARS", value_parser = parse_price)]
    pub min_price: Option<f64>,

    /// Maximum nightly price in dollars (inclusive)
    #[arg(long, value_name = "DOLLARS", value_parser = parse_price)]
    pub max_price: Option<f64>,

    /// Minimum average rating; unreviewed properties are excluded
    #[arg(long, value_parser = parse_rating)]
    pub min_rating: Option<f64>,

    /// Maximum number of results (default from config, 10)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

impl SearchArgs {
    fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            owner_id: self.owner_id,
            city: self.city.clone(),
            min_price_per_night: self.min_price,
            max_price_per_night: self.max_price,
            min_rating: self.min_rating,
        }
    }
}

/// Dollar amount that converts to a stored cent value.
fn parse_price(s: &str) -> Result<f64, String> {
    let price: f64 = s.parse().map_err(|e| format!("{e}"))?;
    match to_minor_units(price) {
        Some(_) => Ok(price),
        None => Err(format!("price must be a finite dollar amount, got {s}")),
    }
}

fn parse_rating(s: &str) -> Result<f64, String> {
    let rating: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(format!("rating must be a finite number, got {s}"))
    }
}

pub async fn run_search(args: SearchArgs, config: &LightbnbConfig) -> Result<()> {
    let filter = args.filter();
    let limit = args.limit.unwrap_or(config.query.default_limit);
    let gateway = connect(config).await?;

    let result = gateway.search_properties(&filter, limit).await;
    gateway.close().await;

    print_json(&result?)
}
