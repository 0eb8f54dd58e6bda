//! Real-time clock access

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of trusted wall-clock time
pub trait Clock: Send + Sync {
    /// Current UTC time in microseconds since the Unix epoch, or `None`
    /// when the clock has not been set (e.g. no GPS fix yet)
    fn utc_micros(&self) -> Option<u64>;
}

/// Host system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn utc_micros(&self) -> Option<u64> {
        let elapsed = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
        u64::try_from(elapsed.as_micros()).ok()
    }
}
