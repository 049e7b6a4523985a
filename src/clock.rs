//! Injected time source
//!
//! Renewal-date validity and the renewal-window report both depend on "now",
//! so every consumer takes a [`Clock`] rather than reading the system time.
//! Production code uses [`SystemClock`]; tests pin [`FixedClock`] to a date.

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

/// Source of the current date and time
pub trait Clock {
    /// Current instant, used for store timestamps
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, used for renewal arithmetic
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        // The operator's local date, not UTC
        Local::now().date_naive()
    }
}

/// Clock pinned to a single date, for tests and reproducible runs
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    today: NaiveDate,
}

impl FixedClock {
    /// Pin the clock to the given date (midnight UTC)
    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self.today.and_hms_opt(0, 0, 0).unwrap_or_default())
    }

    fn today(&self) -> NaiveDate {
        self.today
    }
}
