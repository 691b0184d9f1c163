//! Frozen time for registration timestamps.

use chrono::{DateTime, TimeZone, Utc};
use questbot_core::clock::Clock;

/// Instant at which test users register unless a test moves the clock.
#[must_use]
pub fn registration_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Clock that never moves, so `registered_at` can be asserted exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    /// Frozen at `instant`.
    #[must_use]
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(registration_time())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_registration_time() {
        assert_eq!(FixedClock::default().now(), registration_time());
    }

    #[test]
    fn test_clock_stays_where_it_was_set() {
        let instant = registration_time() + chrono::Duration::days(3);
        let clock = FixedClock::at(instant);

        assert_eq!(clock.now(), instant);
        assert_eq!(clock.now(), clock.now());
    }
}
