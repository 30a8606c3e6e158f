//! Reservations command - a guest's bookings

use anyhow::Result;
use clap::Parser;
use lightbnb_db::LightbnbConfig;

use super::{connect, print_json};

#[derive(Parser, Debug)]
pub struct ReservationsArgs {
    /// Guest (user) id
    pub guest_id: i32,

    /// Maximum number of reservations (default from config, 10)
    #[arg(long, short = 'n')]
    pub limit: Option<u32>,
}

pub async fn run_reservations(args: ReservationsArgs, config: &LightbnbConfig) -> Result<()> {
    let limit = args.limit.unwrap_or(config.query.default_limit);
    let gateway = connect(config).await?;

    let result = gateway
        .list_reservations_for_guest(args.guest_id, limit)
        .await;
    gateway.close().await;

    let reservations = result?;
    tracing::info!(count = reservations.len(), "reservations for guest {}", args.guest_id);
    print_json(&reservations)
}
