use std::sync::Arc;

/// Derives the `keyspace` label value from a Redis key.
///
/// Implementations must return a value from a bounded set; an empty string
/// means "no keyspace".
pub trait KeyspaceExtractor: Send + Sync + 'static {
    // ---
    fn extract(&self, key: &str) -> String;
}

/// Type alias for any strategy that implements KeyspaceExtractor.
pub type KeyspaceExtractorPtr = Arc<dyn KeyspaceExtractor>;
