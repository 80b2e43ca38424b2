//! Redis command recorder.
//!
//! Registers `app_redis_requests_total` and `app_redis_request_duration_seconds`,
//! labeled `{command, keyspace, status}` plus the constant `service` label.

use super::buckets::{default_duration_buckets, resolve_buckets, NAMESPACE};
use super::registration::{fq_name, Registration};
use crate::config::RedisMetricsConfig;
use crate::domain::{RedisRecorder, RedisReqProperties};
use crate::error::Result;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::time::Duration;

const SUBSYSTEM: &str = "redis";

const LABEL_SERVICE: &str = "service";
const LABEL_COMMAND: &str = "command";
const LABEL_KEYSPACE: &str = "keyspace";
const LABEL_STATUS: &str = "status";

const LABELS: [&str; 3] = [LABEL_COMMAND, LABEL_KEYSPACE, LABEL_STATUS];

/// Prometheus-backed [`RedisRecorder`].
pub struct PrometheusRedisRecorder {
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
    registration: Registration,
}

impl PrometheusRedisRecorder {
    /// Builds the Redis instruments and registers them in `registry`.
    pub fn new(registry: &Registry, service_name: &str, config: &RedisMetricsConfig) -> Result<Self> {
        // ---
        let duration_buckets = resolve_buckets("redis duration", &config.duration_buckets, || {
            Ok(default_duration_buckets())
        })?;

        let requests_total = IntCounterVec::new(
            Opts::new("requests_total", "The total number of processed requests.")
                .namespace(NAMESPACE)
                .subsystem(SUBSYSTEM)
                .const_label(LABEL_SERVICE, service_name),
            &LABELS,
        )?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "The latency of the Redis requests.")
                .namespace(NAMESPACE)
                .subsystem(SUBSYSTEM)
                .const_label(LABEL_SERVICE, service_name)
                .buckets(duration_buckets),
            &LABELS,
        )?;

        let mut registration = Registration::new(registry);
        registration.register(fq_name(SUBSYSTEM, "requests_total"), &requests_total)?;
        registration.register(fq_name(SUBSYSTEM, "request_duration_seconds"), &request_duration)?;

        tracing::info!("Registered Redis metrics for {}", service_name);

        Ok(Self {
            requests_total,
            request_duration,
            registration,
        })
    }
}

impl RedisRecorder for PrometheusRedisRecorder {
    // ---
    fn collect(&self, props: &RedisReqProperties, duration: Duration) {
        // ---
        let labels = [props.command.as_str(), props.keyspace.as_str(), props.code.as_str()];

        self.requests_total.with_label_values(&labels).inc();
        self.request_duration
            .with_label_values(&labels)
            .observe(duration.as_secs_f64());
    }

    fn unregister(&self) -> Result<()> {
        // ---
        tracing::debug!("Unregistering Redis metrics");
        self.registration.unregister()
    }
}
