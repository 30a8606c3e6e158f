//! Database connection pool management
//!
//! The pool is built once by the process and injected into
//! [`QueryGateway`](crate::QueryGateway). Nothing here is global.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::debug;

use crate::config::DatabaseConfig;
use crate::error::{GatewayError, GatewayResult, Operation, ResultExt};

/// Create a PostgreSQL connection pool from configuration.
///
/// # Errors
///
/// Returns [`GatewayError::Config`] for unusable settings and
/// [`GatewayError::Connect`] if no connection can be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&LightbnbConfig::load().database).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> GatewayResult<PgPool> {
    let options = config.connect_options()?;
    create_pool_with_options(options, config.max_connections).await
}

/// Create a PostgreSQL connection pool with explicit connect options.
///
/// # Arguments
///
/// * `options` - connect options (host, credentials, database)
/// * `max_connections` - Maximum number of connections in the pool
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> GatewayResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(GatewayError::Connect)?;

    debug!(max_connections, "Database pool created");
    Ok(pool)
}

/// Round-trip `SELECT 1` on the pool.
pub async fn ping(pool: &PgPool) -> GatewayResult<()> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .during(Operation::Ping)?;

    Ok(())
}

/// [`ping`] for a freshly built pool: a failed round-trip means the
/// database is unreachable, so it is reported as [`GatewayError::Connect`].
pub async fn verify(pool: &PgPool) -> GatewayResult<()> {
    ping(pool).await.map_err(|err| match err {
        GatewayError::Query { source, .. } => GatewayError::Connect(source),
        other => other,
    })
}
