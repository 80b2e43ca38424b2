//! Command lifecycle hook that feeds the Redis recorder.
//!
//! The start time of a command travels in a [`CommandContext`] value that the
//! caller threads from `before_process` to `after_process`. Nothing about an
//! in-flight command is stored on the hook itself, so one hook can serve any
//! number of concurrent commands.

use super::keyspace::PathKeyspaceExtractor;
use crate::domain::{KeyspaceExtractorPtr, RedisRecorderPtr, RedisReqProperties};
use crate::error::{MetricsError, Result};
use redis::{Arg, Cmd, Pipeline, RedisResult, Value};
use std::sync::Arc;
use std::time::Instant;

const STATUS_OK: &str = "ok";
const STATUS_ERR: &str = "err";

/// Per-command state carried from dispatch to completion.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandContext {
    started_at: Option<Instant>,
}

impl CommandContext {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this context marked as started at `at`.
    pub fn with_start(self, at: Instant) -> Self {
        // ---
        Self {
            started_at: Some(at),
        }
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }
}

/// Callbacks around the dispatch of Redis commands and pipelines.
pub trait CommandHook: Send + Sync + 'static {
    // ---
    /// Called before a command is sent; returns the context to pass to `after_process`.
    fn before_process(&self, ctx: CommandContext, cmd: &Cmd) -> CommandContext;

    /// Called once the command completed, successfully or not.
    fn after_process(&self, ctx: &CommandContext, cmd: &Cmd, result: &RedisResult<Value>) -> Result<()>;

    fn before_process_pipeline(&self, ctx: CommandContext, pipeline: &Pipeline) -> CommandContext;

    fn after_process_pipeline(
        &self,
        ctx: &CommandContext,
        pipeline: &Pipeline,
        result: &RedisResult<Vec<Value>>,
    ) -> Result<()>;
}

/// Type alias for any hook that implements CommandHook.
pub type CommandHookPtr = Arc<dyn CommandHook>;

/// Hook that times single commands and records them on a [`RedisRecorder`](crate::RedisRecorder).
///
/// Pipelines are not timed: both pipeline callbacks are no-ops.
pub struct CollectHook {
    recorder: RedisRecorderPtr,
    extractor: KeyspaceExtractorPtr,
}

impl CollectHook {
    // ---

    /// Hook using the default `app-name/keyspace/...` key convention.
    pub fn new(recorder: RedisRecorderPtr) -> Self {
        // ---
        Self::with_extractor(recorder, Arc::new(PathKeyspaceExtractor))
    }

    /// Hook using a custom keyspace extraction strategy.
    pub fn with_extractor(recorder: RedisRecorderPtr, extractor: KeyspaceExtractorPtr) -> Self {
        // ---
        Self { recorder, extractor }
    }

    /// Shorthand for `Arc::new(CollectHook::new(recorder))`.
    pub fn shared(recorder: RedisRecorderPtr) -> CommandHookPtr {
        // ---
        Arc::new(Self::new(recorder))
    }

    fn properties(&self, cmd: &Cmd, failed: bool) -> RedisReqProperties {
        // ---
        let mut args = cmd.args_iter();
        let command = args
            .next()
            .and_then(arg_to_string)
            .map(|name| name.to_lowercase())
            .unwrap_or_default();

        // The first argument after the command name is the key, if any.
        let keyspace = args
            .next()
            .and_then(arg_to_string)
            .map(|key| self.extractor.extract(&key))
            .unwrap_or_default();

        RedisReqProperties {
            keyspace,
            command,
            code: if failed { STATUS_ERR } else { STATUS_OK }.to_string(),
        }
    }
}

fn arg_to_string(arg: Arg<&[u8]>) -> Option<String> {
    // ---
    match arg {
        Arg::Simple(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Arg::Cursor => None,
    }
}

impl CommandHook for CollectHook {
    // ---
    fn before_process(&self, ctx: CommandContext, _cmd: &Cmd) -> CommandContext {
        ctx.with_start(Instant::now())
    }

    fn after_process(&self, ctx: &CommandContext, cmd: &Cmd, result: &RedisResult<Value>) -> Result<()> {
        // ---
        let props = self.properties(cmd, result.is_err());

        let Some(started_at) = ctx.started_at() else {
            tracing::warn!(
                "Redis command '{}' completed without a start time, skipping observation",
                props.command
            );
            return Err(MetricsError::MissingStartTime {
                command: props.command,
            });
        };

        self.recorder.collect(&props, started_at.elapsed());
        Ok(())
    }

    fn before_process_pipeline(&self, ctx: CommandContext, _pipeline: &Pipeline) -> CommandContext {
        // Pipelined commands are not timed individually.
        ctx
    }

    fn after_process_pipeline(
        &self,
        _ctx: &CommandContext,
        _pipeline: &Pipeline,
        _result: &RedisResult<Vec<Value>>,
    ) -> Result<()> {
        Ok(())
    }
}
