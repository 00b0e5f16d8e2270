//! System clock adapter

use chrono::{DateTime, Utc};
use courier_application::ports::Clock;

/// Wall-clock time, used to stamp history entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Creates a new system clock.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
