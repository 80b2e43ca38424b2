mod buckets;
mod exposition;
mod http_recorder;
mod postgres_recorder;
mod redis_recorder;
mod registration;

pub use buckets::{default_duration_buckets, default_size_buckets, validate_buckets};
pub use exposition::{content_type, render};
pub use http_recorder::PrometheusHttpRecorder;
pub use postgres_recorder::PrometheusPostgresRecorder;
pub use redis_recorder::PrometheusRedisRecorder;

use super::Recorders;
use crate::config::MetricsConfig;
use crate::domain::{HttpRecorder, RedisRecorder};
use prometheus::Registry;
use std::sync::Arc;

/// Creates Prometheus-backed recorders for all three domains.
///
/// Every instrument is registered in `registry`. Pass
/// `prometheus::default_registry()` for process-wide wiring, or a fresh
/// `Registry::new()` to keep tests isolated.
///
/// # Errors
/// Fails if any instrument is already registered or a bucket override is
/// invalid; recorders built before the failure are unregistered again.
pub fn create(registry: &Registry, config: &MetricsConfig) -> anyhow::Result<Recorders> {
    // ---
    tracing::info!("Initializing Prometheus recorders");
    let service = config.service_name.as_str();

    let http = Arc::new(PrometheusHttpRecorder::new(registry, service, &config.http)?);

    let redis = match PrometheusRedisRecorder::new(registry, service, &config.redis) {
        Ok(redis) => Arc::new(redis),
        Err(err) => {
            roll_back("HTTP", http.unregister());
            return Err(err.into());
        }
    };

    let postgres = match PrometheusPostgresRecorder::new(registry, service) {
        Ok(postgres) => Arc::new(postgres),
        Err(err) => {
            roll_back("HTTP", http.unregister());
            roll_back("Redis", redis.unregister());
            return Err(err.into());
        }
    };

    Ok(Recorders {
        http,
        redis,
        postgres,
    })
}

fn roll_back(domain: &str, result: crate::error::Result<()>) {
    // ---
    if let Err(err) = result {
        tracing::warn!("Failed to roll back {} recorder: {}", domain, err);
    }
}
