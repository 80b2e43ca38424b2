//! Histogram bucket defaults and validation.

use crate::error::{MetricsError, Result};

/// Namespace shared by every instrument this crate registers.
pub(crate) const NAMESPACE: &str = "app";

/// Start, factor and count of the default response size buckets (100B..1GB).
const SIZE_BUCKETS_START: f64 = 100.0;
const SIZE_BUCKETS_FACTOR: f64 = 10.0;
const SIZE_BUCKETS_COUNT: usize = 8;

/// Default latency buckets, 5ms to 10s.
pub fn default_duration_buckets() -> Vec<f64> {
    // ---
    prometheus::DEFAULT_BUCKETS.to_vec()
}

/// Default payload size buckets: 100, 1e3, .. 1e9 bytes.
pub fn default_size_buckets() -> Result<Vec<f64>> {
    // ---
    Ok(prometheus::exponential_buckets(
        SIZE_BUCKETS_START,
        SIZE_BUCKETS_FACTOR,
        SIZE_BUCKETS_COUNT,
    )?)
}

/// Checks that boundaries are finite, positive and strictly ascending.
pub fn validate_buckets(name: &str, buckets: &[f64]) -> Result<()> {
    // ---
    let invalid = |reason: String| MetricsError::InvalidBuckets {
        name: name.to_string(),
        reason,
    };

    if let Some(bad) = buckets.iter().find(|b| !b.is_finite() || **b <= 0.0) {
        return Err(invalid(format!("boundary {bad} is not a positive number")));
    }
    if let Some(pair) = buckets.windows(2).find(|w| w[0] >= w[1]) {
        return Err(invalid(format!(
            "boundaries must be ascending, found {} before {}",
            pair[0], pair[1]
        )));
    }
    Ok(())
}

/// Returns the configured buckets, or `default` when none were configured.
pub(crate) fn resolve_buckets(
    name: &str,
    configured: &[f64],
    default: impl FnOnce() -> Result<Vec<f64>>,
) -> Result<Vec<f64>> {
    // ---
    if configured.is_empty() {
        return default();
    }
    validate_buckets(name, configured)?;
    Ok(configured.to_vec())
}
