use crate::domain::PostgresRecorderPtr;
use sqlx::postgres::PgPoolOptions;

/// Installs the recorder's after-release hook on a Postgres pool.
///
/// Every connection returned to the pool counts as one transaction. The hook
/// always keeps the connection, so pool behaviour is unchanged.
pub fn instrument_pool(options: PgPoolOptions, recorder: PostgresRecorderPtr) -> PgPoolOptions {
    // ---
    options.after_release(move |_conn, _meta| {
        let keep = recorder.after_release_hook();
        Box::pin(async move { Ok(keep) })
    })
}
