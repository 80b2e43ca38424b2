//! HTTP request recorder.
//!
//! Registers `app_http_requests_total`, `app_http_request_duration_seconds`
//! and `app_http_response_size_bytes`, all labeled `{path, method, status}`
//! plus the constant `application` label.

use super::buckets::{default_duration_buckets, default_size_buckets, resolve_buckets, NAMESPACE};
use super::registration::{fq_name, Registration};
use crate::config::HttpMetricsConfig;
use crate::domain::{HttpRecorder, HttpReqProperties};
use crate::error::Result;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};
use std::time::Duration;

const SUBSYSTEM: &str = "http";

const LABEL_APP: &str = "application";
const LABEL_PATH: &str = "path";
const LABEL_METHOD: &str = "method";
const LABEL_STATUS: &str = "status";

const LABELS: [&str; 3] = [LABEL_PATH, LABEL_METHOD, LABEL_STATUS];

/// Prometheus-backed [`HttpRecorder`].
pub struct PrometheusHttpRecorder {
    requests_total: IntCounterVec,
    request_duration: HistogramVec,
    response_size: HistogramVec,
    registration: Registration,
}

impl PrometheusHttpRecorder {
    /// Builds the HTTP instruments and registers them in `registry`.
    ///
    /// # Errors
    /// Fails with [`MetricsError::AlreadyRegistered`](crate::MetricsError::AlreadyRegistered)
    /// if a recorder for the same service is still registered, or with
    /// [`MetricsError::InvalidBuckets`](crate::MetricsError::InvalidBuckets) on bad overrides.
    pub fn new(registry: &Registry, service_name: &str, config: &HttpMetricsConfig) -> Result<Self> {
        // ---
        let duration_buckets = resolve_buckets("http duration", &config.duration_buckets, || {
            Ok(default_duration_buckets())
        })?;
        let size_buckets = resolve_buckets("http response size", &config.size_buckets, default_size_buckets)?;

        let requests_total = IntCounterVec::new(
            Opts::new("requests_total", "The total number of processed requests.")
                .namespace(NAMESPACE)
                .subsystem(SUBSYSTEM)
                .const_label(LABEL_APP, service_name),
            &LABELS,
        )?;

        let request_duration = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "The latency of the HTTP requests.")
                .namespace(NAMESPACE)
                .subsystem(SUBSYSTEM)
                .const_label(LABEL_APP, service_name)
                .buckets(duration_buckets),
            &LABELS,
        )?;

        let response_size = HistogramVec::new(
            HistogramOpts::new("response_size_bytes", "The size of the HTTP responses.")
                .namespace(NAMESPACE)
                .subsystem(SUBSYSTEM)
                .const_label(LABEL_APP, service_name)
                .buckets(size_buckets),
            &LABELS,
        )?;

        let mut registration = Registration::new(registry);
        registration.register(fq_name(SUBSYSTEM, "requests_total"), &requests_total)?;
        registration.register(fq_name(SUBSYSTEM, "request_duration_seconds"), &request_duration)?;
        registration.register(fq_name(SUBSYSTEM, "response_size_bytes"), &response_size)?;

        tracing::info!("Registered HTTP metrics for {}", service_name);

        Ok(Self {
            requests_total,
            request_duration,
            response_size,
            registration,
        })
    }
}

impl HttpRecorder for PrometheusHttpRecorder {
    // ---
    fn collect(&self, props: &HttpReqProperties, duration: Duration, bytes_written: usize) {
        // ---
        let labels = [props.path.as_str(), props.method.as_str(), props.code.as_str()];

        self.requests_total.with_label_values(&labels).inc();
        self.request_duration
            .with_label_values(&labels)
            .observe(duration.as_secs_f64());
        self.response_size
            .with_label_values(&labels)
            .observe(bytes_written as f64);
    }

    fn unregister(&self) -> Result<()> {
        // ---
        tracing::debug!("Unregistering HTTP metrics");
        self.registration.unregister()
    }
}
