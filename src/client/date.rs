//! Renewal date value type and day-month-year parsing
//!
//! Dates travel as `DD-MM-YYYY` strings at the system boundary. Structural
//! validity (pattern, month range, true day count per month, leap years) is
//! separate from the construction-time invariant that a renewal date lies
//! strictly in the future; only construction enforces the latter, so records
//! loaded from storage may carry a lapsed-but-valid date.

use std::fmt;

use chrono::{Months, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CommandError, InvariantViolation};

/// Canonical textual form for renewal dates
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse a day-month-year numeric string into a calendar date
///
/// Distinguishes pattern failures (wrong shape, non-digits) from structurally
/// well-formed strings that name no real date (month 13, 31-04, 29-02 in a
/// non-leap year).
pub fn parse_date_string(input: &str) -> Result<NaiveDate, CommandError> {
    let bad_format = || CommandError::InvalidDateFormat(input.to_string());

    let mut parts = input.split('-');
    let (day_text, month_text, year_text) =
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(d), Some(m), Some(y), None) => (d, m, y),
            _ => return Err(bad_format()),
        };

    if day_text.is_empty() || day_text.len() > 2 || month_text.is_empty() || month_text.len() > 2 {
        return Err(bad_format());
    }
    if year_text.len() != 4 {
        return Err(bad_format());
    }

    let day: u32 = day_text.parse().map_err(|_| bad_format())?;
    let month: u32 = month_text.parse().map_err(|_| bad_format())?;
    let year: i32 = year_text.parse().map_err(|_| bad_format())?;

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| CommandError::NonexistentDate(input.to_string()))
}

/// Whether the input names a real calendar date in `DD-MM-YYYY` form
pub fn is_valid_date_string(input: &str) -> bool {
    parse_date_string(input).is_ok()
}

/// A policy's renewal date
///
/// Construction requires the date be strictly after the supplied "today";
/// [`RenewalDate::from_stored`] and deserialization skip that check, since a
/// persisted record whose date has passed is a lapsed policy, not a malformed
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenewalDate(NaiveDate);

impl RenewalDate {
    /// Construct from an already-parsed date, enforcing the future invariant
    pub fn new(date: NaiveDate, today: NaiveDate) -> Result<Self, InvariantViolation> {
        if date <= today {
            return Err(InvariantViolation::PastRenewalDate {
                date: date.format(DATE_FORMAT).to_string(),
                today: today.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self(date))
    }

    /// Parse a `DD-MM-YYYY` string and enforce the future invariant
    pub fn parse(input: &str, today: NaiveDate) -> Result<Self, CommandError> {
        let date = parse_date_string(input)?;
        Ok(Self::new(date, today)?)
    }

    /// Rehydrate a date from storage without the future check
    pub fn from_stored(date: NaiveDate) -> Self {
        Self(date)
    }

    /// One calendar year out from the given date
    ///
    /// Feb 29 clamps to Feb 28 when the target year is not a leap year.
    pub fn one_year_after(today: NaiveDate) -> Self {
        Self(today + Months::new(12))
    }

    /// The underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Calendar-day difference from `today` to this date, negative if past
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.0 - today).num_days()
    }

    /// Whether the date has already passed as of `today`
    pub fn is_lapsed(&self, today: NaiveDate) -> bool {
        self.days_until(today) < 0
    }
}

impl fmt::Display for RenewalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

// Serialized as the canonical DD-MM-YYYY string so snapshots round-trip
// without precision loss.
impl Serialize for RenewalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RenewalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_date_string(&text)
            .map(RenewalDate::from_stored)
            .map_err(de::Error::custom)
    }
}
