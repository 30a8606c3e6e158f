//! Reservation read model

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

use super::Property;

/// A guest's reservation joined with the reserved property and its
/// average review rating.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ReservationListing {
    pub reservation_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

impl ReservationListing {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}
