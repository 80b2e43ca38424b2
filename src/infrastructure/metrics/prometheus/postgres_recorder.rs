//! Postgres transaction recorder: a single `app_postgres_xacts_total` counter.

use super::buckets::NAMESPACE;
use super::registration::{fq_name, Registration};
use crate::domain::PostgresRecorder;
use crate::error::Result;
use prometheus::{IntCounter, Opts, Registry};

const SUBSYSTEM: &str = "postgres";
const LABEL_SERVICE: &str = "service";

/// Prometheus-backed [`PostgresRecorder`].
pub struct PrometheusPostgresRecorder {
    xacts_total: IntCounter,
    registration: Registration,
}

impl PrometheusPostgresRecorder {
    /// Builds the transaction counter and registers it in `registry`.
    pub fn new(registry: &Registry, service_name: &str) -> Result<Self> {
        // ---
        let xacts_total = IntCounter::with_opts(
            Opts::new("xacts_total", "The total number of processed transactions.")
                .namespace(NAMESPACE)
                .subsystem(SUBSYSTEM)
                .const_label(LABEL_SERVICE, service_name),
        )?;

        let mut registration = Registration::new(registry);
        registration.register(fq_name(SUBSYSTEM, "xacts_total"), &xacts_total)?;

        tracing::info!("Registered Postgres metrics for {}", service_name);

        Ok(Self {
            xacts_total,
            registration,
        })
    }
}

impl PostgresRecorder for PrometheusPostgresRecorder {
    // ---
    fn collect(&self) {
        self.xacts_total.inc();
    }

    fn unregister(&self) -> Result<()> {
        // ---
        tracing::debug!("Unregistering Postgres metrics");
        self.registration.unregister()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn after_release_hook_keeps_connection_and_counts() {
        // ---
        let registry = Registry::new();
        let recorder = PrometheusPostgresRecorder::new(&registry, "test-app").unwrap();

        assert!(recorder.after_release_hook());
        assert!(recorder.after_release_hook());
        assert_eq!(recorder.xacts_total.get(), 2);
    }
}
