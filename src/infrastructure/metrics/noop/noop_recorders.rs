use crate::domain::{HttpRecorder, HttpReqProperties, PostgresRecorder, RedisRecorder, RedisReqProperties};
use crate::error::Result;
use std::time::Duration;

/// No-op HTTP recorder for testing or when metrics are disabled.
pub struct NoopHttpRecorder;

impl HttpRecorder for NoopHttpRecorder {
    // ---
    fn collect(&self, _: &HttpReqProperties, _: Duration, _: usize) {}
    fn unregister(&self) -> Result<()> {
        Ok(())
    }
}

/// No-op Redis recorder.
pub struct NoopRedisRecorder;

impl RedisRecorder for NoopRedisRecorder {
    // ---
    fn collect(&self, _: &RedisReqProperties, _: Duration) {}
    fn unregister(&self) -> Result<()> {
        Ok(())
    }
}

/// No-op Postgres recorder. Still keeps every released connection.
pub struct NoopPostgresRecorder;

impl PostgresRecorder for NoopPostgresRecorder {
    // ---
    fn collect(&self) {}
    fn unregister(&self) -> Result<()> {
        Ok(())
    }
}
