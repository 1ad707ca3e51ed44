//! Working-day counting.
//!
//! A working day is a Monday-to-Friday date that is not a public holiday of
//! its year. Leave consumes only working days.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::calendars::HolidayCalendar;
use crate::types::{CalendarDate, LeaveRange};

/// Counts the working days between two optional dates, both ends included.
///
/// Returns 0 when either date is missing or when `until` is before `from`.
///
/// # Example
///
/// ```rust
/// use leave_core::types::CalendarDate;
/// use leave_core::workdays::calculate_working_days;
///
/// let from = CalendarDate::from_ymd(2024, 1, 1).ok();
/// let until = CalendarDate::from_ymd(2024, 1, 7).ok();
/// assert_eq!(calculate_working_days(from, until), 4);
/// assert_eq!(calculate_working_days(from, None), 0);
/// ```
pub fn calculate_working_days(from: Option<CalendarDate>, until: Option<CalendarDate>) -> u32 {
    let (Some(from), Some(until)) = (from, until) else {
        return 0;
    };
    match LeaveRange::new(from, until) {
        Ok(range) => WorkingDaysCalculator::new().count(&range),
        Err(err) => {
            log::debug!("counting zero working days: {err}");
            0
        }
    }
}

/// Like [`calculate_working_days`], for `yyyy-MM-dd` text.
///
/// Text that does not parse as a calendar date counts as missing.
pub fn calculate_working_days_str(from: Option<&str>, until: Option<&str>) -> u32 {
    let parse = |s: &str| match CalendarDate::parse(s) {
        Ok(date) => Some(date),
        Err(err) => {
            log::debug!("ignoring unparseable date: {err}");
            None
        }
    };
    calculate_working_days(from.and_then(parse), until.and_then(parse))
}

/// How the days of a range split between working days, weekends and holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DayBreakdown {
    /// Every day in the range.
    pub calendar_days: u32,
    /// Saturdays and Sundays, holidays among them included.
    pub weekend_days: u32,
    /// Holidays falling Monday to Friday.
    pub holiday_days: u32,
    /// Days that consume leave.
    pub working_days: u32,
}

/// Counts working days against the public holiday calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkingDaysCalculator {
    calendar: HolidayCalendar,
}

impl WorkingDaysCalculator {
    /// Creates a calculator.
    pub fn new() -> Self {
        Self {
            calendar: HolidayCalendar::new(),
        }
    }

    /// Holiday dates of every year the range touches.
    fn holiday_union(&self, range: &LeaveRange) -> HashSet<CalendarDate> {
        self.calendar.holiday_union(range)
    }

    /// Number of working days in `range`.
    pub fn count(&self, range: &LeaveRange) -> u32 {
        let holidays = self.holiday_union(range);
        range
            .days()
            .filter(|d| d.is_weekday() && !holidays.contains(d))
            .count() as u32
    }

    /// Splits `range` into working, weekend and holiday days.
    pub fn breakdown(&self, range: &LeaveRange) -> DayBreakdown {
        let holidays = self.holiday_union(range);
        let mut out = DayBreakdown::default();

        for day in range.days() {
            out.calendar_days += 1;
            if day.is_weekend() {
                out.weekend_days += 1;
            } else if holidays.contains(&day) {
                out.holiday_days += 1;
            } else {
                out.working_days += 1;
            }
        }

        out
    }

    /// The working days of `range`, ascending.
    pub fn working_dates(&self, range: &LeaveRange) -> Vec<CalendarDate> {
        let holidays = self.holiday_union(range);
        range
            .days()
            .filter(|d| d.is_weekday() && !holidays.contains(d))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_first_week_of_2024() {
        // Jan 1 (Mon) holiday, Jan 6 (Sat) holiday on a weekend
        assert_eq!(
            calculate_working_days(Some(d(2024, 1, 1)), Some(d(2024, 1, 7))),
            4
        );
    }

    #[test]
    fn test_missing_endpoints() {
        let x = Some(d(2024, 3, 4));
        assert_eq!(calculate_working_days(None, x), 0);
        assert_eq!(calculate_working_days(x, None), 0);
        assert_eq!(calculate_working_days(None, None), 0);
    }

    #[test]
    fn test_inverted_range_is_zero() {
        assert_eq!(
            calculate_working_days(Some(d(2024, 3, 8)), Some(d(2024, 3, 4))),
            0
        );
    }

    #[test]
    fn test_single_day() {
        // Tuesday, not a holiday
        let tue = Some(d(2024, 3, 5));
        assert_eq!(calculate_working_days(tue, tue), 1);
        // Saturday
        let sat = Some(d(2024, 3, 9));
        assert_eq!(calculate_working_days(sat, sat), 0);
        // Independence Day 2024 is a Monday
        let holiday = Some(d(2024, 3, 25));
        assert_eq!(calculate_working_days(holiday, holiday), 0);
    }

    #[test]
    fn test_string_inputs() {
        assert_eq!(
            calculate_working_days_str(Some("2024-01-01"), Some("2024-01-07")),
            4
        );
        assert_eq!(
            calculate_working_days_str(Some("2024-02-30"), Some("2024-03-07")),
            0
        );
        assert_eq!(calculate_working_days_str(Some("garbage"), None), 0);
    }

    #[test]
    fn test_easter_week_2024() {
        // Apr 29 (Mon) .. May 10 (Fri): May 1 Labour Day, May 3 Good Friday,
        // May 6 Easter Monday; 10 weekdays - 3 holidays
        assert_eq!(
            calculate_working_days(Some(d(2024, 4, 29)), Some(d(2024, 5, 10))),
            7
        );
    }

    #[test]
    fn test_range_across_year_end() {
        // Dec 23 2024 (Mon) .. Jan 3 2025 (Fri): Dec 25, 26 and Jan 1 are holidays
        let range = LeaveRange::new(d(2024, 12, 23), d(2025, 1, 3)).unwrap();
        assert_eq!(WorkingDaysCalculator::new().count(&range), 7);
    }

    #[test]
    fn test_range_across_three_years_uses_every_year() {
        let calc = WorkingDaysCalculator::new();
        let range = LeaveRange::new(d(2023, 12, 1), d(2025, 1, 31)).unwrap();
        let middle_year = LeaveRange::new(d(2024, 1, 1), d(2024, 12, 31)).unwrap();
        let dates = calc.working_dates(&range);
        // Independence Day 2024 must be excluded
        assert!(!dates.contains(&d(2024, 3, 25)));
        assert_eq!(
            calc.count(&range),
            calc.count(&LeaveRange::new(d(2023, 12, 1), d(2023, 12, 31)).unwrap())
                + calc.count(&middle_year)
                + calc.count(&LeaveRange::new(d(2025, 1, 1), d(2025, 1, 31)).unwrap())
        );
    }

    #[test]
    fn test_breakdown_sums() {
        let range = LeaveRange::new(d(2024, 1, 1), d(2024, 1, 7)).unwrap();
        let b = WorkingDaysCalculator::new().breakdown(&range);
        assert_eq!(
            b,
            DayBreakdown {
                calendar_days: 7,
                weekend_days: 2,
                holiday_days: 1,
                working_days: 4,
            }
        );
    }

    #[test]
    fn test_working_dates() {
        let range = LeaveRange::new(d(2024, 1, 1), d(2024, 1, 7)).unwrap();
        let dates = WorkingDaysCalculator::new().working_dates(&range);
        assert_eq!(
            dates,
            vec![d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4), d(2024, 1, 5)]
        );
    }
}
