//! Holiday calendars and working-day rules.
//!
//! This module provides:
//! - Orthodox Easter computation
//! - The public holiday calendar, generated per year
//! - A month grid for calendar views with an explicit week start

mod easter;
mod holidays;
mod month_grid;

pub use easter::orthodox_easter;
pub use holidays::{Holiday, HolidayCalendar, HolidayKind, HolidaySet, HOLIDAYS_PER_YEAR};
pub use month_grid::{DayCell, DayStatus, MonthGrid, WeekStart};

use crate::types::{CalendarDate, LeaveRange};

/// Trait for working-day calendars.
///
/// Calendars determine which days are working days vs holidays.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a working day.
    fn is_business_day(&self, date: CalendarDate) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: CalendarDate) -> bool {
        !self.is_business_day(date)
    }

    /// Advances a date by a number of working days.
    ///
    /// Returns `None` if the walk runs past the supported date range.
    fn add_business_days(&self, date: CalendarDate, days: i32) -> Option<CalendarDate> {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.checked_add_days(direction)?;
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        Some(result)
    }

    /// Returns the next working day on or after the given date.
    fn next_business_day(&self, date: CalendarDate) -> Option<CalendarDate> {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.succ()?;
        }
        Some(result)
    }

    /// Returns the previous working day on or before the given date.
    fn previous_business_day(&self, date: CalendarDate) -> Option<CalendarDate> {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.checked_add_days(-1)?;
        }
        Some(result)
    }

    /// Counts working days in a range, both ends included.
    fn business_days_in(&self, range: &LeaveRange) -> u32 {
        range.days().filter(|d| self.is_business_day(*d)).count() as u32
    }
}

/// A weekend-only calendar (no holidays).
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: CalendarDate) -> bool {
        date.is_weekday()
    }
}
