//! Reservation repository

use sqlx::PgPool;

use crate::error::{GatewayResult, Operation, ResultExt};
use crate::models::ReservationListing;

/// Reservation repository
pub struct ReservationRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ReservationRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a guest's reservations, earliest start date first.
    ///
    /// One row per reservation. Reviews are LEFT JOINed so reservations of
    /// unreviewed properties come back with `average_rating = None`.
    pub async fn list_for_guest(
        &self,
        guest_id: i32,
        limit: u32,
    ) -> GatewayResult<Vec<ReservationListing>> {
        sqlx::query_as::<_, ReservationListing>(
            r#"
            SELECT
                r.id AS reservation_id,
                r.start_date,
                r.end_date,
                p.id, p.owner_id, p.title, p.description,
                p.thumbnail_photo_url, p.cover_photo_url, p.cost_per_night,
                p.street, p.city, p.province, p.post_code, p.country,
                p.parking_spaces, p.number_of_bathrooms, p.number_of_bedrooms,
                avg(pr.rating)::float8 AS average_rating
            FROM reservations r
            JOIN properties p ON p.id = r.property_id
            LEFT JOIN property_reviews pr ON pr.property_id = p.id
            WHERE r.guest_id = $1
            GROUP BY r.id, p.id
            ORDER BY r.start_date, r.id
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(i64::from(limit))
        .fetch_all(self.pool)
        .await
        .during(Operation::ListReservationsForGuest)
    }
}
