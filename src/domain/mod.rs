mod keyspace;
mod metrics;

// Publicly expose the recorder abstractions
pub use metrics::{
    HttpRecorder, // ---
    HttpRecorderPtr,
    HttpReqProperties,
    PostgresRecorder,
    PostgresRecorderPtr,
    RedisRecorder,
    RedisRecorderPtr,
    RedisReqProperties,
};

// Publicly expose the keyspace strategy
pub use keyspace::{KeyspaceExtractor, KeyspaceExtractorPtr};
