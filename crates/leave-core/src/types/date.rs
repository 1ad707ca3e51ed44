//! Calendar date type for leave calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;

use crate::error::{LeaveError, LeaveResult};

/// Storage encoding of a date (`yyyy-MM-dd`).
pub const DB_DATE_FORMAT: &str = "%Y-%m-%d";

/// On-screen encoding of a date (`dd-MM-yyyy`).
pub const SHOW_DATE_FORMAT: &str = "%d-%m-%Y";

/// A local calendar date with day granularity.
///
/// This is a newtype wrapper around `chrono::NaiveDate`. There is no time of
/// day and no timezone: two values are equal exactly when they name the same
/// year, month and day.
///
/// Years are limited to `MIN_YEAR..=MAX_YEAR` so that every value encodes to
/// the four-digit `yyyy-MM-dd` form and parses back to itself.
///
/// # Example
///
/// ```rust
/// use leave_core::types::CalendarDate;
///
/// let date = CalendarDate::from_ymd(2024, 5, 6).unwrap();
/// assert_eq!(date.to_string(), "2024-05-06");
/// assert_eq!(date.to_display_string(), "06-05-2024");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Smallest supported year.
    pub const MIN_YEAR: i32 = 1;

    /// Largest supported year.
    pub const MAX_YEAR: i32 = 9999;

    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidDate` if the date does not exist or the
    /// year is outside the supported range.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> LeaveResult<Self> {
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year) {
            return Err(LeaveError::invalid_date(format!(
                "year {year} is outside {}..={}",
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(CalendarDate)
            .ok_or_else(|| LeaveError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Parses the storage encoding (`yyyy-MM-dd`).
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> LeaveResult<Self> {
        Self::parse_with(s, DB_DATE_FORMAT)
    }

    /// Parses the on-screen encoding (`dd-MM-yyyy`).
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidDate` if the string is not a valid date.
    pub fn parse_display(s: &str) -> LeaveResult<Self> {
        Self::parse_with(s, SHOW_DATE_FORMAT)
    }

    /// Parses a date using a chrono format string.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidDate` if the string does not match.
    pub fn parse_with(s: &str, format: &str) -> LeaveResult<Self> {
        let naive = NaiveDate::parse_from_str(s.trim(), format)
            .map_err(|_| LeaveError::invalid_date(format!("Cannot parse: {s}")))?;
        Self::try_from(naive)
    }

    /// Returns today's local date.
    #[must_use]
    pub fn today() -> Self {
        CalendarDate(chrono::Local::now().date_naive())
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a Saturday or Sunday.
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Checks if the date is Monday through Friday.
    #[must_use]
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Adds a (possibly negative) number of days.
    ///
    /// Returns `None` when the result leaves the supported year range.
    #[must_use]
    pub fn checked_add_days(&self, days: i64) -> Option<Self> {
        let shifted = self.0.checked_add_signed(chrono::Duration::days(days))?;
        Self::try_from(shifted).ok()
    }

    /// Returns the following day, if it is still in range.
    #[must_use]
    pub fn succ(&self) -> Option<Self> {
        self.checked_add_days(1)
    }

    /// Returns the first Monday strictly after this date.
    #[must_use]
    pub fn next_monday(&self) -> Option<Self> {
        let ahead = 7 - i64::from(self.weekday().num_days_from_monday());
        self.checked_add_days(ahead)
    }

    /// Calculates the number of calendar days from `self` to `other`.
    #[must_use]
    pub fn days_between(&self, other: &CalendarDate) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Formats the date in the on-screen encoding (`dd-MM-yyyy`).
    #[must_use]
    pub fn to_display_string(&self) -> String {
        self.0.format(SHOW_DATE_FORMAT).to_string()
    }

    /// Formats the date with a chrono format string.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidDate` if `format` is not a valid format
    /// string.
    pub fn format_with(&self, format: &str) -> LeaveResult<String> {
        use std::fmt::Write;

        let mut out = String::new();
        write!(out, "{}", self.0.format(format))
            .map_err(|_| LeaveError::invalid_date(format!("Invalid date format: {format}")))?;
        Ok(out)
    }

    /// Returns the first day of the year.
    #[must_use]
    pub fn start_of_year(&self) -> Self {
        CalendarDate(self.0.with_ordinal(1).unwrap_or(self.0))
    }

    /// Returns the last day of the year.
    #[must_use]
    pub fn end_of_year(&self) -> Self {
        CalendarDate(
            NaiveDate::from_ymd_opt(self.year(), 12, 31)
                .expect("last of year should always be valid"),
        )
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DB_DATE_FORMAT))
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = LeaveError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        if (Self::MIN_YEAR..=Self::MAX_YEAR).contains(&date.year()) {
            Ok(CalendarDate(date))
        } else {
            Err(LeaveError::invalid_date(format!(
                "year {} is outside {}..={}",
                date.year(),
                Self::MIN_YEAR,
                Self::MAX_YEAR
            )))
        }
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = LeaveError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl std::str::FromStr for CalendarDate {
    type Err = LeaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Sub<CalendarDate> for CalendarDate {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: CalendarDate) -> Self::Output {
        other.days_between(&self)
    }
}

/// Converts a stored `yyyy-MM-dd` string to its `dd-MM-yyyy` display form.
///
/// # Errors
///
/// Returns `LeaveError::InvalidDate` if the input does not parse.
pub fn to_show_date(db_date: &str) -> LeaveResult<String> {
    CalendarDate::parse(db_date).map(|d| d.to_display_string())
}
