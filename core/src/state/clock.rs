// Calendar clock
// Supplies "today" to the dismissal logic so date rollover is testable

use chrono::{Local, NaiveDate};
use std::sync::{Arc, Mutex};

/// Source of the current calendar date in the host's local timezone
pub trait Clock: Send + Sync {
    /// Today's date
    fn today(&self) -> NaiveDate;
}

/// Wall clock backed by the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a settable date
///
/// Clones share the same date, so a test can keep a handle and advance the
/// clock after handing it to a controller.
#[derive(Debug, Clone)]
pub struct FixedClock {
    date: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    /// Create a clock that reports `date`
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date: Arc::new(Mutex::new(date)),
        }
    }

    /// Move the clock to `date`
    pub fn set(&self, date: NaiveDate) {
        *self.date.lock().unwrap_or_else(|e| e.into_inner()) = date;
    }

    /// Advance the clock by whole days
    pub fn advance_days(&self, days: u64) {
        let mut date = self.date.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = date.checked_add_days(chrono::Days::new(days)) {
            *date = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.date.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_shared_between_clones() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap());
        let handle = clock.clone();

        handle.advance_days(1);
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        handle.set(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
