// src/lib.rs

//! Request telemetry recorders for an HTTP server, a Redis client and a
//! Postgres pool, exposed through a Prometheus registry.
//!
//! Each recorder registers its instruments once on construction, turns domain
//! events into labeled observations via `collect`, and removes its instruments
//! again with `unregister`, so recorders can be rebuilt in the same registry.

use axum::{middleware, routing::get, Router};

use handlers::{health_check, metrics_handler, root_handler, track_http_metrics};

// Public exports (visible outside this module)
pub mod domain;
pub mod infrastructure;

// Internal-only exports (sibling access within this module)
mod app_state;
mod config;
mod error;
mod handlers;

// Hoist up only the public symbol(s)
pub use app_state::{AppState, RedisConn};
pub use config::*;
pub use domain::{
    HttpRecorder, // ---
    HttpReqProperties,
    PostgresRecorder,
    RedisRecorder,
    RedisReqProperties,
};
pub use error::{MetricsError, Result};

// Publicly expose the infrastructure creation functions
pub use infrastructure::{
    create_noop_recorders, // ---
    create_prom_recorders,
    instrument_pool,
    render,
    CollectHook,
    CommandContext,
    CommandHook,
    InstrumentedConnection,
    Recorders,
};

/// Build the HTTP router.
///
/// Every routed request is recorded on the state's HTTP recorder, and
/// `/metrics` serves the state's registry.
pub fn create_router(state: AppState) -> Router {
    // ---
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            track_http_metrics,
        ))
        .with_state(state)
}
