//! Orthodox Easter computation.

use crate::types::CalendarDate;

/// Calculate Orthodox Easter Sunday for a Gregorian year.
///
/// Uses the Meeus Julian algorithm and shifts the result onto the Gregorian
/// calendar by a fixed 13 days, which is exact for 1900-2099. Integer
/// arithmetic only.
///
/// Years outside `CalendarDate::MIN_YEAR..=CalendarDate::MAX_YEAR` are clamped
/// into that range, so the function is total.
///
/// # Example
///
/// ```rust
/// use leave_core::calendars::orthodox_easter;
/// use leave_core::types::CalendarDate;
///
/// assert_eq!(orthodox_easter(2024), CalendarDate::from_ymd(2024, 5, 5).unwrap());
/// ```
#[must_use]
pub fn orthodox_easter(year: i32) -> CalendarDate {
    let year = year.clamp(CalendarDate::MIN_YEAR, CalendarDate::MAX_YEAR);

    let r1 = year.rem_euclid(4);
    let r2 = year.rem_euclid(7);
    let r3 = year.rem_euclid(19);
    let r4 = (19 * r3 + 15).rem_euclid(30);
    let r5 = (2 * r1 + 4 * r2 + 6 * r4 + 6).rem_euclid(7);
    let days = r5 + r4 + 13;

    // days is in 13..=48, so each branch lands on a real day of its month
    let (month, day) = if days > 39 {
        (5, days - 39)
    } else if days > 9 {
        (4, days - 9)
    } else {
        (3, days + 22)
    };

    CalendarDate::from_ymd(year, month, day as u32)
        .expect("orthodox easter always falls in March, April or May")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_known_dates() {
        assert_eq!(orthodox_easter(2021), d(2021, 5, 2));
        assert_eq!(orthodox_easter(2022), d(2022, 4, 24));
        assert_eq!(orthodox_easter(2023), d(2023, 4, 16));
        assert_eq!(orthodox_easter(2024), d(2024, 5, 5));
        assert_eq!(orthodox_easter(2025), d(2025, 4, 20));
        assert_eq!(orthodox_easter(2026), d(2026, 4, 12));
    }

    #[test]
    fn test_always_a_sunday_in_modern_era() {
        for year in 1900..=2099 {
            assert_eq!(
                orthodox_easter(year).weekday(),
                chrono::Weekday::Sun,
                "year {year}"
            );
        }
    }

    #[test]
    fn test_out_of_range_years_do_not_panic() {
        assert_eq!(orthodox_easter(i32::MIN).year(), CalendarDate::MIN_YEAR);
        assert_eq!(orthodox_easter(i32::MAX).year(), CalendarDate::MAX_YEAR);
    }
}
