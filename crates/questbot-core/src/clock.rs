//! Clock abstraction so registration timestamps stay testable.

use chrono::{DateTime, Utc};

/// Source of "now" for records that carry a timestamp.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the running bot.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
