//! Errors surfaced by recorder construction, teardown and the Redis hook.
//!
//! `collect` never fails; everything here is either a lifecycle mistake
//! (duplicate registration, double teardown) or a hook contract violation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    /// An instrument with the same identity is already present in the registry.
    #[error("metric already registered: {metric}")]
    AlreadyRegistered { metric: String },

    /// Instruments that could not be removed during teardown.
    #[error("failed to unregister metrics: {}", .metrics.join(", "))]
    Unregister { metrics: Vec<String> },

    /// A completion event arrived without the start marker set on dispatch.
    #[error("no start time recorded for redis command '{command}'")]
    MissingStartTime { command: String },

    /// Bucket boundaries must be positive and strictly ascending.
    #[error("invalid buckets for {name}: {reason}")]
    InvalidBuckets { name: String, reason: String },

    #[error(transparent)]
    Prometheus(#[from] prometheus::Error),
}

pub type Result<T> = std::result::Result<T, MetricsError>;
