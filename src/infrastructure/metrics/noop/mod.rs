// src/infrastructure/metrics/noop/mod.rs
mod noop_recorders;

pub use noop_recorders::{NoopHttpRecorder, NoopPostgresRecorder, NoopRedisRecorder};

use super::Recorders;
use std::sync::Arc;

/// Creates recorders that ignore every observation.
///
/// Useful for development, testing, or when metrics are disabled.
pub fn create() -> anyhow::Result<Recorders> {
    // ---
    tracing::info!("Metrics disabled, using no-op recorders");
    Ok(Recorders {
        http: Arc::new(NoopHttpRecorder),
        redis: Arc::new(NoopRedisRecorder),
        postgres: Arc::new(NoopPostgresRecorder),
    })
}
