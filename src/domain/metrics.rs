use crate::error::Result;
use std::sync::Arc;
use std::time::Duration;

/// Properties of one finished HTTP request.
///
/// `path` must already be a route template (e.g. `/orders/{id}`), never the raw
/// request path, or the label cardinality becomes unbounded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReqProperties {
    // ---
    /// Route template of the request.
    pub path: String,

    /// Method of the request.
    pub method: String,

    /// Response status code.
    pub code: String,
}

/// Properties of one finished Redis command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedisReqProperties {
    // ---
    /// Key space of the request, empty when the command carries no key.
    pub keyspace: String,

    /// Canonical command name.
    pub command: String,

    /// `ok` or `err`.
    pub code: String,
}

/// Records HTTP request counts, latencies and response sizes.
pub trait HttpRecorder: Send + Sync + 'static {
    // ---
    /// Record one finished request.
    fn collect(&self, props: &HttpReqProperties, duration: Duration, bytes_written: usize);

    /// Remove every instrument owned by this recorder from its registry.
    fn unregister(&self) -> Result<()>;
}

/// Records Redis command counts and latencies.
pub trait RedisRecorder: Send + Sync + 'static {
    // ---
    /// Record one finished command.
    fn collect(&self, props: &RedisReqProperties, duration: Duration);

    /// Remove every instrument owned by this recorder from its registry.
    fn unregister(&self) -> Result<()>;
}

/// Counts Postgres transactions, one per pooled connection released.
pub trait PostgresRecorder: Send + Sync + 'static {
    // ---
    /// Count one transaction.
    fn collect(&self);

    /// Remove the transaction counter from its registry.
    fn unregister(&self) -> Result<()>;

    /// Pool after-release callback.
    ///
    /// Counts the released connection and always asks the pool to keep it;
    /// the recorder observes pool behaviour but never vetoes it.
    fn after_release_hook(&self) -> bool {
        // ---
        self.collect();
        true
    }
}

/// Type alias for any backend that implements HttpRecorder.
pub type HttpRecorderPtr = Arc<dyn HttpRecorder>;

/// Type alias for any backend that implements RedisRecorder.
pub type RedisRecorderPtr = Arc<dyn RedisRecorder>;

/// Type alias for any backend that implements PostgresRecorder.
pub type PostgresRecorderPtr = Arc<dyn PostgresRecorder>;
