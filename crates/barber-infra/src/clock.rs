//! Wall-clock implementation of the `Clock` port.

use barber_core::service::clock::Clock;
use barber_types::time::truncate_to_seconds;
use chrono::NaiveDateTime;

/// Local time, truncated to whole seconds to match stored precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        truncate_to_seconds(chrono::Local::now().naive_local())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_now_has_no_subsecond_part() {
        assert_eq!(SystemClock.now().nanosecond(), 0);
    }

    #[test]
    fn test_today_matches_now() {
        let clock = SystemClock;
        let today = clock.today();
        let now = clock.now();
        // Tolerate a midnight rollover between the two reads.
        assert!(now.date() == today || now.date() == today.succ_opt().unwrap());
    }
}
