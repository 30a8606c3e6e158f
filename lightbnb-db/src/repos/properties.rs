//! Property repository
//!
//! Filtered search with rating aggregation, and listing creation.

use sqlx::PgPool;
use tracing::debug;

use super::search::PropertySearch;
use crate::error::{GatewayError, GatewayResult, Operation, ResultExt};
use crate::models::{to_minor_units, NewProperty, Property, PropertyFilter, PropertyListing};

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search properties, cheapest first, with their average rating.
    pub async fn search(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> GatewayResult<Vec<PropertyListing>> {
        let mut builder = PropertySearch::new(filter, limit).build()?;
        debug!(sql = builder.sql(), ?filter, limit, "search properties");

        builder
            .build_query_as::<PropertyListing>()
            .fetch_all(self.pool)
            .await
            .during(Operation::SearchProperties)
    }

    /// Insert a property and return the stored row.
    ///
    /// `cost_per_night` arrives in major units and is stored in minor units.
    /// A cost with no minor-unit value is rejected before the insert.
    pub async fn create(&self, property: &NewProperty) -> GatewayResult<Property> {
        let cost_per_night =
            to_minor_units(property.cost_per_night).ok_or(GatewayError::InvalidPrice {
                operation: Operation::CreateProperty,
                value: property.cost_per_night,
            })?;

        sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties (
                owner_id, title, description,
                thumbnail_photo_url, cover_photo_url, cost_per_night,
                street, city, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING
                id, owner_id, title, description,
                thumbnail_photo_url, cover_photo_url, cost_per_night,
                street, city, province, post_code, country,
                parking_spaces, number_of_bathrooms, number_of_bedrooms
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(property.description.as_deref())
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(cost_per_night)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(self.pool)
        .await
        .during(Operation::CreateProperty)
    }
}
