pub mod noop;
pub mod prometheus;

use crate::domain::{HttpRecorderPtr, PostgresRecorderPtr, RedisRecorderPtr};

// Re-export the factory functions for easy access
pub use self::noop::create as create_noop_recorders;
pub use self::prometheus::create as create_prom_recorders;

/// One recorder per instrumented domain.
#[derive(Clone)]
pub struct Recorders {
    pub http: HttpRecorderPtr,
    pub redis: RedisRecorderPtr,
    pub postgres: PostgresRecorderPtr,
}

impl Recorders {
    // ---

    /// Unregisters all three recorders, attempting each even if one fails.
    pub fn unregister_all(&self) -> crate::error::Result<()> {
        // ---
        let results = [
            self.http.unregister(),
            self.redis.unregister(),
            self.postgres.unregister(),
        ];

        let failed: Vec<String> = results
            .into_iter()
            .filter_map(|result| match result {
                Ok(()) => None,
                Err(crate::MetricsError::Unregister { metrics }) => Some(metrics),
                Err(other) => Some(vec![other.to_string()]),
            })
            .flatten()
            .collect();

        if failed.is_empty() {
            Ok(())
        } else {
            Err(crate::MetricsError::Unregister { metrics: failed })
        }
    }
}
