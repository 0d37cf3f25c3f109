//! Clock abstraction
//!
//! Arrival predictions are computed against "now" at the moment the response
//! is processed. The clock is injectable so tests can pin it.

use chrono::{DateTime, Local};
#[cfg(test)]
use mockall::automock;

/// Source of the current local date-time
#[cfg_attr(test, automock)]
pub trait Clock: Send + Sync {
    /// Current local date-time
    fn now(&self) -> DateTime<Local>;
}

/// System clock, the default for production use
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let first = clock.now();
        let second = clock.now();
        assert!(second >= first);
    }

    #[test]
    fn test_mock_clock_returns_pinned_time() {
        let pinned = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut clock = MockClock::new();
        clock.expect_now().return_const(pinned);
        assert_eq!(clock.now(), pinned);
    }
}
