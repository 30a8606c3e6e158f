//! Property records and search filters

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::money::to_major_units;

/// Property row from `properties`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Property {
    pub id: i32,
    pub owner_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Minor currency units (cents).
    pub cost_per_night: i32,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
}

impl Property {
    /// Nightly cost in major currency units.
    pub fn cost_per_night_major(&self) -> f64 {
        to_major_units(self.cost_per_night)
    }
}

/// Property with its average review rating.
///
/// `average_rating` is `None` when the property has no reviews.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// Fields for a new `properties` row.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Major currency units; converted to minor units on insert.
    pub cost_per_night: f64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
}

/// Optional filters for property search. Every supplied filter applies.
///
/// Prices are in major currency units.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyFilter {
    pub owner_id: Option<i32>,
    /// Case-sensitive substring of the city name.
    pub city: Option<String>,
    pub min_price_per_night: Option<f64>,
    pub max_price_per_night: Option<f64>,
    /// Minimum average rating; unreviewed properties never match.
    pub min_rating: Option<f64>,
}

impl PropertyFilter {
    pub fn owner(mut self, owner_id: i32) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn price_between(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min_price_per_night = min;
        self.max_price_per_night = max;
        self
    }

    pub fn min_rating(mut self, rating: f64) -> Self {
        self.min_rating = Some(rating);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
