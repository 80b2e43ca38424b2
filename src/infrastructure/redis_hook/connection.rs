use super::hook::{CommandContext, CommandHookPtr};
use redis::aio::ConnectionLike;
use redis::{Cmd, Pipeline, RedisFuture, Value};

/// Async Redis connection that runs a [`CommandHook`](super::CommandHook) around every request.
///
/// Wraps any `ConnectionLike` (e.g. `MultiplexedConnection`), so it works with
/// `AsyncCommands`, `query_async` and pipelines unchanged. Each request gets its
/// own [`CommandContext`]; hook errors are logged and never fail the command.
#[derive(Clone)]
pub struct InstrumentedConnection<C> {
    inner: C,
    hook: CommandHookPtr,
}

impl<C> InstrumentedConnection<C> {
    // ---
    pub fn new(inner: C, hook: CommandHookPtr) -> Self {
        // ---
        Self { inner, hook }
    }

    /// Returns the wrapped connection.
    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> ConnectionLike for InstrumentedConnection<C>
where
    C: ConnectionLike + Send,
{
    fn req_packed_command<'a>(&'a mut self, cmd: &'a Cmd) -> RedisFuture<'a, Value> {
        // ---
        Box::pin(async move {
            let ctx = self.hook.before_process(CommandContext::new(), cmd);
            let result = self.inner.req_packed_command(cmd).await;
            if let Err(err) = self.hook.after_process(&ctx, cmd, &result) {
                tracing::debug!("Redis hook failed: {}", err);
            }
            result
        })
    }

    fn req_packed_commands<'a>(
        &'a mut self,
        cmd: &'a Pipeline,
        offset: usize,
        count: usize,
    ) -> RedisFuture<'a, Vec<Value>> {
        // ---
        Box::pin(async move {
            let ctx = self.hook.before_process_pipeline(CommandContext::new(), cmd);
            let result = self.inner.req_packed_commands(cmd, offset, count).await;
            if let Err(err) = self.hook.after_process_pipeline(&ctx, cmd, &result) {
                tracing::debug!("Redis pipeline hook failed: {}", err);
            }
            result
        })
    }

    fn get_db(&self) -> i64 {
        self.inner.get_db()
    }
}
