//! Inclusive date range.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::CalendarDate;
use crate::error::{LeaveError, LeaveResult};

/// An inclusive range of calendar days, `from..=until`.
///
/// Construction enforces `from <= until`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRange")]
pub struct LeaveRange {
    from: CalendarDate,
    until: CalendarDate,
}

#[derive(Deserialize)]
struct RawRange {
    from: CalendarDate,
    until: CalendarDate,
}

impl TryFrom<RawRange> for LeaveRange {
    type Error = LeaveError;

    fn try_from(raw: RawRange) -> Result<Self, Self::Error> {
        LeaveRange::new(raw.from, raw.until)
    }
}

impl LeaveRange {
    /// Creates a range.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvertedRange` if `until` is before `from`.
    pub fn new(from: CalendarDate, until: CalendarDate) -> LeaveResult<Self> {
        if until < from {
            return Err(LeaveError::inverted_range(from, until));
        }
        Ok(Self { from, until })
    }

    /// Single-day range.
    #[must_use]
    pub fn single(date: CalendarDate) -> Self {
        Self {
            from: date,
            until: date,
        }
    }

    /// First day of the range.
    #[must_use]
    pub fn from(&self) -> CalendarDate {
        self.from
    }

    /// Last day of the range.
    #[must_use]
    pub fn until(&self) -> CalendarDate {
        self.until
    }

    /// Number of calendar days covered, both ends included.
    #[must_use]
    pub fn calendar_days(&self) -> u32 {
        (self.until - self.from + 1) as u32
    }

    /// Every year the range touches, ascending.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.from.year()..=self.until.year()
    }

    /// Returns true if `date` falls inside the range.
    #[must_use]
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.from <= date && date <= self.until
    }

    /// Iterates every day in the range, both ends included.
    pub fn days(&self) -> Days {
        Days {
            next: Some(self.from),
            until: self.until,
        }
    }
}

impl fmt::Display for LeaveRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.from, self.until)
    }
}

/// Iterator over the days of a [`LeaveRange`].
#[derive(Debug, Clone)]
pub struct Days {
    next: Option<CalendarDate>,
    until: CalendarDate,
}

impl Iterator for Days {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = if current < self.until {
            current.succ()
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = LeaveRange::new(d(2024, 5, 2), d(2024, 5, 1)).unwrap_err();
        assert!(matches!(err, LeaveError::InvertedRange { .. }));
    }

    #[test]
    fn test_days_inclusive() {
        let range = LeaveRange::new(d(2024, 2, 27), d(2024, 3, 1)).unwrap();
        let days: Vec<_> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[2], d(2024, 2, 29));
        assert_eq!(range.calendar_days(), 4);
    }

    #[test]
    fn test_days_at_upper_bound() {
        let last = d(CalendarDate::MAX_YEAR, 12, 31);
        let range = LeaveRange::new(d(CalendarDate::MAX_YEAR, 12, 30), last).unwrap();
        assert_eq!(range.days().count(), 2);
    }

    #[test]
    fn test_years() {
        let range = LeaveRange::new(d(2023, 12, 20), d(2025, 1, 5)).unwrap();
        assert_eq!(range.years().collect::<Vec<_>>(), vec![2023, 2024, 2025]);
    }

    #[test]
    fn test_serde_rejects_inverted() {
        let ok: LeaveRange =
            serde_json::from_str(r#"{"from":"2024-01-02","until":"2024-01-05"}"#).unwrap();
        assert_eq!(ok.calendar_days(), 4);
        assert!(serde_json::from_str::<LeaveRange>(
            r#"{"from":"2024-01-05","until":"2024-01-02"}"#
        )
        .is_err());
    }
}
