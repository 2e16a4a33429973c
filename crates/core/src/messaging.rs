//! Ports the host platform implements to show output to players.

use mcsapi_api::{PlayerStats, PlayerUuid};
use mcsapi_text::Message;
use std::error::Error;
use tracing::error;

pub trait MessageSender: Send + Sync {
    /// Delivers a message to a player. Offline players are skipped silently.
    fn send(&self, player: PlayerUuid, message: Message);
}

/// Receives remote failures when debug output is enabled.
pub trait DebugSink: Send + Sync {
    fn log_error(&self, context: &str, error: &dyn Error);
}

pub struct TracingDebugSink;

impl DebugSink for TracingDebugSink {
    fn log_error(&self, context: &str, err: &dyn Error) {
        error!("{}: {}", context, err);
    }
}

/// Presents fetched statistics, e.g. as an inventory view.
pub trait StatsDisplay: Send + Sync {
    fn open_stats(&self, invoker: PlayerUuid, target: PlayerUuid, title: Message, stats: PlayerStats);
}
