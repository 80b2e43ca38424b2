//! Application state management.
//!
//! `AppState` is passed to every Axum handler and middleware via the `State`
//! extractor. It is cheap to clone: the registry, recorders, Redis connection
//! and Postgres pool are all reference-counted handles.

use crate::domain::HttpRecorderPtr;
use crate::infrastructure::{InstrumentedConnection, Recorders};
use prometheus::Registry;
use redis::aio::MultiplexedConnection;
use sqlx::PgPool;

/// Redis connection whose commands are recorded by the Redis recorder.
pub type RedisConn = InstrumentedConnection<MultiplexedConnection>;

/// Shared application state passed to all Axum handlers.
///
/// # Fields
///
/// - `registry`: registry rendered by `/metrics`
/// - `recorders`: HTTP, Redis and Postgres recorders
/// - `redis`: optional instrumented Redis connection, probed by `/health?mode=full`
/// - `pool`: optional instrumented Postgres pool, probed by `/health?mode=full`
#[derive(Clone)]
pub struct AppState {
    registry: Registry,
    recorders: Recorders,
    redis: Option<RedisConn>,
    pool: Option<PgPool>,
}

impl AppState {
    // ---

    pub fn new(registry: Registry, recorders: Recorders) -> Self {
        // ---
        AppState {
            registry,
            recorders,
            redis: None,
            pool: None,
        }
    }

    /// Attach an instrumented Redis connection.
    pub fn with_redis(mut self, conn: RedisConn) -> Self {
        // ---
        self.redis = Some(conn);
        self
    }

    /// Attach a Postgres pool built with [`instrument_pool`](crate::instrument_pool).
    pub fn with_pool(mut self, pool: PgPool) -> Self {
        // ---
        self.pool = Some(pool);
        self
    }

    /// Get a reference to the registry served on `/metrics`.
    pub(crate) fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Get a reference to the HTTP recorder.
    pub(crate) fn http_recorder(&self) -> &HttpRecorderPtr {
        &self.recorders.http
    }

    /// Get a handle to the Redis connection, if one is configured.
    ///
    /// Multiplexed connections are cheap to clone and safe to use concurrently.
    pub(crate) fn redis_conn(&self) -> Option<RedisConn> {
        self.redis.clone()
    }

    /// Get a reference to the Postgres pool, if one is configured.
    pub(crate) fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }
}
