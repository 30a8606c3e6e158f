//! lightbnb-db: PostgreSQL query gateway for LightBnB
//!
//! Translates application requests (look up a user, list reservations,
//! search properties, add a listing) into single parameterized statements
//! over an injected connection pool, and maps rows back to plain records.
//!
//! Every operation returns `Result<_, GatewayError>`. "Not found" is
//! `Ok(None)` or an empty `Vec`; failures always carry the operation name.

pub mod config;
pub mod error;
pub mod models;
pub mod pool;
pub mod repos;

use sqlx::PgPool;
use tracing::{info, instrument};

pub use config::{DatabaseConfig, LightbnbConfig, QueryConfig};
pub use error::{GatewayError, GatewayResult, Operation};
pub use models::{
    NewProperty, NewUser, Property, PropertyFilter, PropertyListing, ReservationListing, User,
    DEFAULT_LIMIT,
};
use repos::{PropertyRepo, ReservationRepo, UserRepo};

/// Stateless gateway over a shared connection pool.
///
/// Cloning is cheap; clones share the pool.
#[derive(Clone, Debug)]
pub struct QueryGateway {
    pool: PgPool,
}

impl QueryGateway {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a pool from configuration and verify it with a round-trip.
    ///
    /// Both a failed connection and a failed round-trip are
    /// [`GatewayError::Connect`].
    pub async fn connect(config: &DatabaseConfig) -> GatewayResult<Self> {
        let pool = pool::create_pool(config).await?;
        pool::verify(&pool).await?;
        info!(max_connections = config.max_connections, "Connected to database");
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// `SELECT 1` health probe.
    pub async fn ping(&self) -> GatewayResult<()> {
        pool::ping(&self.pool).await
    }

    /// Close every pooled connection. Waits for checked-out connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }

    #[instrument(skip_all)]
    pub async fn find_user_by_email(&self, email: &str) -> GatewayResult<Option<User>> {
        UserRepo::new(&self.pool).find_by_email(email).await
    }

    #[instrument(skip(self))]
    pub async fn find_user_by_id(&self, id: i32) -> GatewayResult<Option<User>> {
        UserRepo::new(&self.pool).find_by_id(id).await
    }

    /// Insert a user; the returned record carries the generated id.
    #[instrument(skip_all)]
    pub async fn create_user(&self, user: &NewUser) -> GatewayResult<User> {
        UserRepo::new(&self.pool).create(user).await
    }

    /// At most `limit` reservations for a guest, earliest first.
    #[instrument(skip(self))]
    pub async fn list_reservations_for_guest(
        &self,
        guest_id: i32,
        limit: u32,
    ) -> GatewayResult<Vec<ReservationListing>> {
        ReservationRepo::new(&self.pool)
            .list_for_guest(guest_id, limit)
            .await
    }

    /// At most `limit` properties matching every supplied filter, cheapest first.
    #[instrument(skip(self))]
    pub async fn search_properties(
        &self,
        filter: &PropertyFilter,
        limit: u32,
    ) -> GatewayResult<Vec<PropertyListing>> {
        PropertyRepo::new(&self.pool).search(filter, limit).await
    }

    #[instrument(skip_all, fields(owner_id = property.owner_id))]
    pub async fn create_property(&self, property: &NewProperty) -> GatewayResult<Property> {
        PropertyRepo::new(&self.pool).create(property).await
    }
}
