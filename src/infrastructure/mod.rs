pub mod metrics;
mod postgres_pool;
pub mod redis_hook;

// Re-export the factory functions for easy access
pub use metrics::{create_noop_recorders, create_prom_recorders, Recorders};
pub use metrics::prometheus::{content_type, render, validate_buckets};
pub use postgres_pool::instrument_pool;
pub use redis_hook::{CollectHook, CommandContext, CommandHook, CommandHookPtr, InstrumentedConnection};
