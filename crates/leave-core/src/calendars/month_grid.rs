//! Month layout for calendar views.
//!
//! The first day of the week is always passed in; nothing here reads locale
//! or process-wide settings.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::HolidayCalendar;
use crate::error::{LeaveError, LeaveResult};
use crate::types::CalendarDate;

/// First day of a displayed week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Weeks run Monday to Sunday.
    #[default]
    Monday,
    /// Weeks run Sunday to Saturday.
    Sunday,
}

impl WeekStart {
    /// The weekday in the first column.
    pub fn weekday(&self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    /// Column (0-6) of `weekday` in a week starting on `self`.
    pub fn column_of(&self, weekday: Weekday) -> usize {
        let start = self.weekday().num_days_from_monday();
        ((weekday.num_days_from_monday() + 7 - start) % 7) as usize
    }

    /// Weekdays in column order.
    pub fn ordered_weekdays(&self) -> [Weekday; 7] {
        let mut days = [Weekday::Mon; 7];
        let mut day = self.weekday();
        for slot in &mut days {
            *slot = day;
            day = day.succ();
        }
        days
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStart::Monday => f.write_str("monday"),
            WeekStart::Sunday => f.write_str("sunday"),
        }
    }
}

impl FromStr for WeekStart {
    type Err = LeaveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(LeaveError::calendar_error(format!(
                "unknown week start '{other}'"
            ))),
        }
    }
}

/// How a day counts towards leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayStatus {
    /// Consumes a leave day.
    Working,
    /// Saturday or Sunday.
    Weekend,
    /// Public holiday on a weekday.
    Holiday,
}

/// One populated cell of a [`MonthGrid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCell {
    /// The date shown.
    pub date: CalendarDate,
    /// Its working-day status.
    pub status: DayStatus,
}

/// A month laid out in week rows of seven columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthGrid {
    /// Year shown.
    pub year: i32,
    /// Month shown (1-12).
    pub month: u32,
    /// First column's weekday.
    pub week_start: WeekStart,
    /// Rows of cells; `None` pads days outside the month.
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthGrid {
    /// Lays out `year`/`month` with weeks starting on `week_start`.
    ///
    /// # Errors
    ///
    /// Returns `LeaveError::InvalidMonth` for a month outside 1-12 and
    /// `LeaveError::InvalidDate` for an unsupported year.
    pub fn new(year: i32, month: u32, week_start: WeekStart) -> LeaveResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(LeaveError::InvalidMonth { month });
        }
        let first = CalendarDate::from_ymd(year, month, 1)?;
        let calendar = HolidayCalendar::new();
        let holidays = calendar.holidays(year);

        let mut weeks = Vec::with_capacity(6);
        let mut row: [Option<DayCell>; 7] = [None; 7];
        let mut column = week_start.column_of(first.weekday());
        let mut current = Some(first);

        while let Some(date) = current.filter(|d| d.month() == month) {
            let status = if date.is_weekend() {
                DayStatus::Weekend
            } else if holidays.contains(date) {
                DayStatus::Holiday
            } else {
                DayStatus::Working
            };
            row[column] = Some(DayCell { date, status });

            column += 1;
            if column == 7 {
                weeks.push(row);
                row = [None; 7];
                column = 0;
            }
            current = date.succ();
        }
        if column > 0 {
            weeks.push(row);
        }

        Ok(Self {
            year,
            month,
            week_start,
            weeks,
        })
    }

    /// English month name.
    pub fn month_name(&self) -> &'static str {
        [
            "January",
            "February",
            "March",
            "April",
            "May",
            "June",
            "July",
            "August",
            "September",
            "October",
            "November",
            "December",
        ][(self.month as usize).saturating_sub(1) % 12]
    }

    /// Two-letter weekday headers in column order.
    pub fn headers(&self) -> [&'static str; 7] {
        self.week_start.ordered_weekdays().map(|wd| match wd {
            Weekday::Mon => "Mo",
            Weekday::Tue => "Tu",
            Weekday::Wed => "We",
            Weekday::Thu => "Th",
            Weekday::Fri => "Fr",
            Weekday::Sat => "Sa",
            Weekday::Sun => "Su",
        })
    }

    /// Every populated cell in date order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }

    /// Number of working days in the month.
    pub fn working_days(&self) -> usize {
        self.cells()
            .filter(|c| c.status == DayStatus::Working)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monday_start_layout() {
        // May 2024 starts on a Wednesday
        let grid = MonthGrid::new(2024, 5, WeekStart::Monday).unwrap();
        assert_eq!(grid.headers()[0], "Mo");
        let first_row = &grid.weeks[0];
        assert!(first_row[0].is_none());
        assert!(first_row[1].is_none());
        assert_eq!(first_row[2].unwrap().date.day(), 1);
        assert_eq!(grid.cells().count(), 31);
    }

    #[test]
    fn test_sunday_start_shifts_columns() {
        let grid = MonthGrid::new(2024, 5, WeekStart::Sunday).unwrap();
        assert_eq!(grid.headers()[0], "Su");
        assert_eq!(grid.weeks[0][3].unwrap().date.day(), 1);
    }

    #[test]
    fn test_statuses() {
        let grid = MonthGrid::new(2024, 5, WeekStart::Monday).unwrap();
        let status_of = |day: u32| {
            grid.cells()
                .find(|c| c.date.day() == day)
                .map(|c| c.status)
                .unwrap()
        };
        assert_eq!(status_of(1), DayStatus::Holiday); // Labour Day
        assert_eq!(status_of(3), DayStatus::Holiday); // Good Friday
        assert_eq!(status_of(4), DayStatus::Weekend);
        assert_eq!(status_of(6), DayStatus::Holiday); // Easter Monday
        assert_eq!(status_of(7), DayStatus::Working);
    }

    #[test]
    fn test_february_fits_four_rows() {
        // February 2021 starts on a Monday and has 28 days
        let grid = MonthGrid::new(2021, 2, WeekStart::Monday).unwrap();
        assert_eq!(grid.weeks.len(), 4);
        let grid = MonthGrid::new(2021, 2, WeekStart::Sunday).unwrap();
        assert_eq!(grid.weeks.len(), 5);
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            MonthGrid::new(2024, 13, WeekStart::Monday),
            Err(LeaveError::InvalidMonth { month: 13 })
        ));
    }

    #[test]
    fn test_week_start_parse() {
        assert_eq!("Sunday".parse::<WeekStart>().unwrap(), WeekStart::Sunday);
        assert_eq!("mon".parse::<WeekStart>().unwrap(), WeekStart::Monday);
        assert!("friday".parse::<WeekStart>().is_err());
    }
}
