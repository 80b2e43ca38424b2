mod connection;
mod hook;
mod keyspace;

pub use connection::InstrumentedConnection;
pub use hook::{CollectHook, CommandContext, CommandHook, CommandHookPtr};
pub use keyspace::PathKeyspaceExtractor;
