//! Clock trait for reading the current local time.
//!
//! Defined in barber-core so booking rules ("not in the past") can be tested
//! against a fixed instant. The `SystemClock` adapter lives in barber-infra.

use chrono::{NaiveDate, NaiveDateTime};

/// Source of the shop's local wall-clock time.
pub trait Clock: Send + Sync {
    /// Current local date-time, without timezone.
    fn now(&self) -> NaiveDateTime;

    /// Current local date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}
