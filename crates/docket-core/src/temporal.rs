//! # Temporal Types — Calendar Dates Without Time-of-Day
//!
//! Every comparison in Docket happens at calendar-day granularity. Rather
//! than truncating timestamps to midnight at each comparison site, the
//! engine works on [`CalendarDate`], which has no time-of-day component at
//! all. Timezone and time-of-day artifacts are impossible by construction.
//!
//! ## Record Dates
//!
//! Operators type dates into records, and historical data contains blanks
//! and malformed values. [`RecordDate`] keeps the raw text exactly as it was
//! entered so that write-back never loses data, and exposes
//! [`RecordDate::parsed()`] for the engine. Text that does not parse is an
//! *unknown* date, never an error.
//!
//! ## Clock
//!
//! "Today" is injected through the [`Clock`] trait so that classification,
//! scanning and statistics are reproducible in tests.

use chrono::{DateTime, Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DocketError;

/// Canonical wire format for calendar dates.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A calendar day with no time-of-day and no timezone.
///
/// Serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from year, month (1-12) and day. Returns `None` for
    /// dates that do not exist (e.g. February 30th).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Wrap a `chrono::NaiveDate`.
    pub fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Strictly parse `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`DocketError::InvalidDate`] for any other input.
    pub fn parse(s: &str) -> Result<Self, DocketError> {
        NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
            .map(Self)
            .map_err(|_| DocketError::InvalidDate {
                input: s.to_string(),
            })
    }

    /// Leniently parse a record date.
    ///
    /// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp, in which case the
    /// calendar day in the timestamp's own offset is taken. Anything else,
    /// including blank text, yields `None`.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return Some(Self(date));
        }
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Self(dt.date_naive()))
    }

    /// Access the inner `NaiveDate`.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// The date `days` days later. Saturates at the latest representable date.
    pub fn plus_days(&self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }

    /// Signed number of whole days from `self` to `other`.
    ///
    /// Positive when `other` is later, negative when it is earlier.
    pub fn days_until(&self, other: CalendarDate) -> i64 {
        other.0.signed_duration_since(self.0).num_days()
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Calendar month, 1-12.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The first day of this date's month, `months` months later.
    pub fn month_start_after(&self, months: u32) -> Self {
        let start = self.0.with_day(1).unwrap_or(self.0);
        Self(
            start
                .checked_add_months(Months::new(months))
                .unwrap_or(NaiveDate::MAX),
        )
    }

    /// Render as `YYYY-MM-DD`.
    pub fn to_iso8601(&self) -> String {
        self.0.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = DocketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// A date as entered on a record: raw text, parsed on demand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDate(String);

impl RecordDate {
    /// Wrap raw text.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The text as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The calendar date, if the text is a recognisable date.
    pub fn parsed(&self) -> Option<CalendarDate> {
        CalendarDate::parse_lenient(&self.0)
    }

    /// Whether the text is empty or whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<CalendarDate> for RecordDate {
    fn from(date: CalendarDate) -> Self {
        Self(date.to_iso8601())
    }
}

impl From<&str> for RecordDate {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl std::fmt::Display for RecordDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The calendar date of an optional record date, treating blank or
/// malformed text as unknown.
pub fn known_date(date: Option<&RecordDate>) -> Option<CalendarDate> {
    date.and_then(RecordDate::parsed)
}

/// A source of "today".
pub trait Clock: Send + Sync {
    /// The current calendar date.
    fn today(&self) -> CalendarDate;
}

/// The host's local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        CalendarDate(Local::now().date_naive())
    }
}

/// A clock frozen on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse(s).unwrap()
    }

    #[test]
    fn strict_parse_accepts_iso_date() {
        let d = date("2024-06-01");
        assert_eq!(d.year(), 2024);
        assert_eq!(d.month(), 6);
        assert_eq!(d.to_iso8601(), "2024-06-01");
    }

    #[test]
    fn strict_parse_rejects_other_formats() {
        assert!(CalendarDate::parse("01/06/2024").is_err());
        assert!(CalendarDate::parse("2024-02-30").is_err());
        assert!(CalendarDate::parse("").is_err());
        assert!(CalendarDate::parse("2024-06-01T10:00:00Z").is_err());
    }

    #[test]
    fn lenient_parse_takes_calendar_day_of_timestamp() {
        let d = CalendarDate::parse_lenient("2024-06-01T23:30:00+04:00").unwrap();
        assert_eq!(d.to_iso8601(), "2024-06-01");
    }

    #[test]
    fn lenient_parse_treats_garbage_as_unknown() {
        assert_eq!(CalendarDate::parse_lenient(""), None);
        assert_eq!(CalendarDate::parse_lenient("   "), None);
        assert_eq!(CalendarDate::parse_lenient("soon"), None);
        assert_eq!(CalendarDate::parse_lenient("2024-13-01"), None);
    }

    #[test]
    fn days_until_is_signed() {
        let today = date("2024-06-01");
        assert_eq!(today.days_until(date("2024-07-15")), 44);
        assert_eq!(today.days_until(date("2024-05-30")), -2);
        assert_eq!(today.days_until(today), 0);
    }

    #[test]
    fn plus_days_crosses_month_and_year() {
        assert_eq!(date("2024-06-01").plus_days(120), date("2024-09-29"));
        assert_eq!(date("2024-12-31").plus_days(1), date("2025-01-01"));
    }

    #[test]
    fn month_start_after_rolls_into_next_year() {
        let d = date("2024-11-17");
        assert_eq!(d.month_start_after(0), date("2024-11-01"));
        assert_eq!(d.month_start_after(2), date("2025-01-01"));
    }

    #[test]
    fn record_date_keeps_raw_text() {
        let rd = RecordDate::new("not a date");
        assert_eq!(rd.as_str(), "not a date");
        assert_eq!(rd.parsed(), None);
        assert!(!rd.is_blank());
        assert!(RecordDate::new("  ").is_blank());
    }

    #[test]
    fn known_date_handles_absent_and_blank() {
        assert_eq!(known_date(None), None);
        assert_eq!(known_date(Some(&RecordDate::new(""))), None);
        assert_eq!(
            known_date(Some(&RecordDate::new("2025-01-01"))),
            Some(date("2025-01-01"))
        );
    }

    #[test]
    fn fixed_clock_returns_its_date() {
        let clock = FixedClock(date("2024-06-01"));
        assert_eq!(clock.today(), date("2024-06-01"));
    }

    #[test]
    fn serde_uses_iso_text() {
        let d = date("2024-06-01");
        assert_eq!(serde_json::to_string(&d).unwrap(), "\"2024-06-01\"");
        let rd: RecordDate = serde_json::from_str("\"\"").unwrap();
        assert!(rd.is_blank());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Lenient parsing never panics on arbitrary text.
        #[test]
        fn lenient_parse_never_panics(s in ".{0,40}") {
            let _ = CalendarDate::parse_lenient(&s);
        }

        /// Every valid date survives a render/parse cycle through both parsers.
        #[test]
        fn iso_text_is_recognised(days in 0u64..80_000) {
            let base = CalendarDate::from_ymd(1900, 1, 1).unwrap();
            let d = base.plus_days(days);
            let text = d.to_iso8601();
            prop_assert_eq!(CalendarDate::parse(&text).unwrap(), d);
            prop_assert_eq!(CalendarDate::parse_lenient(&text), Some(d));
        }

        /// `days_until` agrees with `plus_days`.
        #[test]
        fn days_until_inverts_plus_days(days in 0u64..5_000) {
            let base = CalendarDate::from_ymd(2024, 6, 1).unwrap();
            prop_assert_eq!(base.days_until(base.plus_days(days)), days as i64);
        }
    }
}
