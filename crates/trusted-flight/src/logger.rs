//! Event log for trusted flight attempts

use crate::limits::MAX_LOG_MESSAGE_LENGTH;

/// Append-only sink for validation narratives
///
/// Writes are fire-and-forget: a sink must not fail the caller.
pub trait EventLog: Send + Sync {
    /// Record `message` at `timestamp_us` microseconds since startup
    fn write(&self, message: &str, timestamp_us: u64);
}

/// Forwards events to `tracing` under the `trusted_flight` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLog;

impl EventLog for TracingEventLog {
    fn write(&self, message: &str, timestamp_us: u64) {
        tracing::info!(target: "trusted_flight", timestamp_us, "{message}");
    }
}

/// Cut `message` to the log record size without splitting a character
pub(crate) fn truncate_message(message: &str) -> &str {
    if message.len() <= MAX_LOG_MESSAGE_LENGTH {
        return message;
    }
    let mut end = MAX_LOG_MESSAGE_LENGTH;
    while !message.is_char_boundary(end) {
        end -= 1;
    }
    &message[..end]
}
