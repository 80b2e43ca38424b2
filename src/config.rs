// src/config.rs

//! Application configuration loaded from environment variables.
//!
//! Recorders themselves only need a service name and optional bucket
//! overrides; the rest is wiring for the demo server. Configuration is
//! validated eagerly and failures are treated as deployment errors rather
//! than recoverable runtime conditions.

use crate::infrastructure::validate_buckets;
use anyhow::Result;

// ============================================================
// Local macros (config-only, intentionally explicit)
// ============================================================

/// Reads a required environment variable.
///
/// Fails fast with a human-readable message if the variable is missing.
macro_rules! required_env {
    // ---
    ($key:literal) => {
        std::env::var($key)
            .map_err(|_| anyhow::anyhow!(concat!("Missing required configuration: ", $key)))?
    };
}

/// Reads an optional environment variable, falling back to `$default`.
macro_rules! optional_env {
    // ---
    ($key:literal, $default:expr) => {
        std::env::var($key).unwrap_or_else(|_| $default.to_string())
    };
}

/// Reads an optional comma-separated list of bucket boundaries.
///
/// A missing or blank variable yields an empty list (use the defaults).
/// Anything present must parse and pass validation.
macro_rules! optional_buckets_env {
    // ---
    ($key:literal) => {
        match std::env::var($key) {
            Ok(raw) => parse_buckets($key, &raw)?,
            Err(_) => Vec::new(),
        }
    };
}

#[cfg(test)]
/// Asserts that a configuration constructor fails due to a missing
/// required environment variable.
macro_rules! assert_missing_config {
    // ---
    ($expr:expr, $key:literal) => {{
        let err = $expr.expect_err("expected configuration error");
        assert!(
            err.to_string()
                .contains(concat!("Missing required configuration: ", $key)),
            "unexpected error: {err}"
        );
    }};
}

/// Parses `"0.1, 0.5,1"` into validated, ascending bucket boundaries.
fn parse_buckets(key: &str, raw: &str) -> Result<Vec<f64>> {
    // ---
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let buckets = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| anyhow::anyhow!("Invalid bucket boundary '{}' in {}", part.trim(), key))
        })
        .collect::<Result<Vec<f64>>>()?;

    validate_buckets(key, &buckets)?;
    Ok(buckets)
}

// ============================================================
// Public configuration facade
// ============================================================

/// Aggregated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub metrics: metrics::MetricsConfig,
    pub server: server::ServerConfig,
}

impl AppConfig {
    /// Loads and validates all application configuration from the environment.
    ///
    /// # Errors
    /// Returns an error if any required configuration is missing or invalid.
    pub fn from_env() -> Result<Self> {
        // ---
        Ok(Self {
            metrics: metrics::MetricsConfig::from_env()?,
            server: server::ServerConfig::from_env()?,
        })
    }
}

// ============================================================
// Metrics configuration
// ============================================================

mod metrics {
    // ---
    use super::*;

    /// Which recorder backend to build.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MetricsBackend {
        /// Prometheus instruments registered in a registry.
        Prometheus,
        /// Recorders that drop every observation.
        Noop,
    }

    impl std::str::FromStr for MetricsBackend {
        type Err = anyhow::Error;

        fn from_str(s: &str) -> Result<Self> {
            // ---
            match s {
                "prom" | "prometheus" => Ok(MetricsBackend::Prometheus),
                "noop" => Ok(MetricsBackend::Noop),
                other => anyhow::bail!("Unknown metrics backend '{}' (expected 'prom' or 'noop')", other),
            }
        }
    }

    /// Bucket overrides for the HTTP recorder. Empty lists mean "use defaults".
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct HttpMetricsConfig {
        /// Request duration buckets in seconds. Defaults to 5ms..10s.
        pub duration_buckets: Vec<f64>,

        /// Response size buckets in bytes. Defaults to 100B..1GB.
        pub size_buckets: Vec<f64>,
    }

    /// Bucket overrides for the Redis recorder. Empty means "use defaults".
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct RedisMetricsConfig {
        /// Command duration buckets in seconds. Defaults to 5ms..10s.
        pub duration_buckets: Vec<f64>,
    }

    /// Recorder configuration derived from environment variables.
    #[derive(Debug, Clone)]
    pub struct MetricsConfig {
        /// Value of the constant service-identity label on every instrument.
        pub service_name: String,

        /// Recorder backend. Defaults to Prometheus.
        pub backend: MetricsBackend,

        pub http: HttpMetricsConfig,
        pub redis: RedisMetricsConfig,
    }

    impl MetricsConfig {
        /// Builds a [`MetricsConfig`] from environment variables.
        ///
        /// # Errors
        /// Returns an error if the service name is missing, the backend is
        /// unknown, or a bucket list is malformed.
        pub fn from_env() -> Result<Self> {
            // ---
            let service_name = required_env!("APP_SERVICE_NAME");
            let backend = optional_env!("APP_METRICS_TYPE", "prom").parse()?;

            let http = HttpMetricsConfig {
                duration_buckets: optional_buckets_env!("APP_HTTP_DURATION_BUCKETS"),
                size_buckets: optional_buckets_env!("APP_HTTP_SIZE_BUCKETS"),
            };
            let redis = RedisMetricsConfig {
                duration_buckets: optional_buckets_env!("APP_REDIS_DURATION_BUCKETS"),
            };

            Ok(Self {
                service_name,
                backend,
                http,
                redis,
            })
        }
    }
}
pub use metrics::{HttpMetricsConfig, MetricsBackend, MetricsConfig, RedisMetricsConfig};

// ============================================================
// Server configuration
// ============================================================

mod server {
    // ---
    use super::*;

    /// Listener and collaborator endpoints for the demo server.
    #[derive(Debug, Clone)]
    pub struct ServerConfig {
        /// Address the HTTP server binds to. Defaults to 127.0.0.1:8080.
        pub bind_addr: String,

        /// Redis connection string. Redis probing is skipped when unset.
        pub redis_url: Option<String>,

        /// PostgreSQL connection string. Postgres probing is skipped when unset.
        pub database_url: Option<String>,
    }

    impl ServerConfig {
        /// Builds a [`ServerConfig`] from environment variables.
        pub fn from_env() -> Result<Self> {
            // ---
            Ok(Self {
                bind_addr: optional_env!("APP_BIND_ADDR", "127.0.0.1:8080"),
                redis_url: std::env::var("APP_REDIS_URL").ok(),
                database_url: std::env::var("DATABASE_URL").ok(),
            })
        }
    }
}
pub use server::ServerConfig;

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use anyhow::Result;
    use serial_test::serial;

    fn clear_metrics_env() {
        // ---
        for key in [
            "APP_SERVICE_NAME",
            "APP_METRICS_TYPE",
            "APP_HTTP_DURATION_BUCKETS",
            "APP_HTTP_SIZE_BUCKETS",
            "APP_REDIS_DURATION_BUCKETS",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn missing_service_name_fails() -> Result<()> {
        // ---
        clear_metrics_env();

        assert_missing_config!(MetricsConfig::from_env(), "APP_SERVICE_NAME");

        Ok(())
    }

    #[test]
    #[serial]
    fn metrics_defaults_applied() -> Result<()> {
        // ---
        clear_metrics_env();
        std::env::set_var("APP_SERVICE_NAME", "orders-api");

        let cfg = MetricsConfig::from_env()?;
        assert_eq!(cfg.service_name, "orders-api");
        assert_eq!(cfg.backend, MetricsBackend::Prometheus);
        assert_eq!(cfg.http, HttpMetricsConfig::default());
        assert_eq!(cfg.redis, RedisMetricsConfig::default());

        Ok(())
    }

    #[test]
    #[serial]
    fn bucket_overrides_parsed() -> Result<()> {
        // ---
        clear_metrics_env();
        std::env::set_var("APP_SERVICE_NAME", "orders-api");
        std::env::set_var("APP_METRICS_TYPE", "noop");
        std::env::set_var("APP_HTTP_DURATION_BUCKETS", "0.1, 0.5,1");
        std::env::set_var("APP_HTTP_SIZE_BUCKETS", "");
        std::env::set_var("APP_REDIS_DURATION_BUCKETS", "1,2,10");

        let cfg = MetricsConfig::from_env()?;
        assert_eq!(cfg.backend, MetricsBackend::Noop);
        assert_eq!(cfg.http.duration_buckets, vec![0.1, 0.5, 1.0]);
        assert!(cfg.http.size_buckets.is_empty());
        assert_eq!(cfg.redis.duration_buckets, vec![1.0, 2.0, 10.0]);

        Ok(())
    }

    #[test]
    #[serial]
    fn malformed_buckets_fail() -> Result<()> {
        // ---
        clear_metrics_env();
        std::env::set_var("APP_SERVICE_NAME", "orders-api");
        std::env::set_var("APP_HTTP_DURATION_BUCKETS", "0.1,fast");

        let err = MetricsConfig::from_env().expect_err("expected parse error");
        assert!(err.to_string().contains("'fast'"), "unexpected error: {err}");

        std::env::set_var("APP_HTTP_DURATION_BUCKETS", "1,0.5");
        assert!(MetricsConfig::from_env().is_err());

        clear_metrics_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn unknown_backend_fails() -> Result<()> {
        // ---
        clear_metrics_env();
        std::env::set_var("APP_SERVICE_NAME", "orders-api");
        std::env::set_var("APP_METRICS_TYPE", "statsd");

        assert!(MetricsConfig::from_env().is_err());

        clear_metrics_env();
        Ok(())
    }

    #[test]
    #[serial]
    fn server_defaults_applied() -> Result<()> {
        // ---
        std::env::remove_var("APP_BIND_ADDR");
        std::env::remove_var("APP_REDIS_URL");
        std::env::remove_var("DATABASE_URL");

        let cfg = ServerConfig::from_env()?;
        assert_eq!(cfg.bind_addr, "127.0.0.1:8080");
        assert!(cfg.redis_url.is_none());
        assert!(cfg.database_url.is_none());

        Ok(())
    }
}
