//! Public holiday calendar.
//!
//! The calendar covers the Greek national holidays: seven fixed dates, May Day
//! (moved to the following Monday when it lands on a weekend) and four dates
//! anchored on Orthodox Easter.

use std::collections::BTreeSet;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::easter::orthodox_easter;
use super::Calendar;
use crate::types::{CalendarDate, LeaveRange};

/// Number of entries in every [`HolidaySet`].
pub const HOLIDAYS_PER_YEAR: usize = 12;

/// Identifies a public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HolidayKind {
    /// January 1.
    NewYearsDay,
    /// January 6.
    Epiphany,
    /// Easter - 48 days.
    CleanMonday,
    /// March 25.
    IndependenceDay,
    /// Easter - 2 days.
    GoodFriday,
    /// Easter + 1 day.
    EasterMonday,
    /// May 1, or the following Monday when May 1 is a weekend day.
    LabourDay,
    /// Easter + 50 days.
    WhitMonday,
    /// August 15.
    Assumption,
    /// October 28.
    OchiDay,
    /// December 25.
    ChristmasDay,
    /// December 26.
    SynaxisOfTheTheotokos,
}

impl HolidayKind {
    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            HolidayKind::NewYearsDay => "New Year's Day",
            HolidayKind::Epiphany => "Epiphany",
            HolidayKind::CleanMonday => "Clean Monday",
            HolidayKind::IndependenceDay => "Independence Day",
            HolidayKind::GoodFriday => "Good Friday",
            HolidayKind::EasterMonday => "Easter Monday",
            HolidayKind::LabourDay => "Labour Day",
            HolidayKind::WhitMonday => "Whit Monday",
            HolidayKind::Assumption => "Assumption",
            HolidayKind::OchiDay => "Ochi Day",
            HolidayKind::ChristmasDay => "Christmas Day",
            HolidayKind::SynaxisOfTheTheotokos => "Synaxis of the Theotokos",
        }
    }

    /// Returns true for holidays whose date follows Easter.
    pub fn is_movable(&self) -> bool {
        matches!(
            self,
            HolidayKind::CleanMonday
                | HolidayKind::GoodFriday
                | HolidayKind::EasterMonday
                | HolidayKind::WhitMonday
        )
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dated public holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holiday {
    /// The observed date.
    pub date: CalendarDate,
    /// Which holiday it is.
    pub kind: HolidayKind,
}

/// The public holidays of one year.
///
/// Always holds [`HOLIDAYS_PER_YEAR`] entries. Entries are not deduplicated:
/// in 2021 Easter Monday and the shifted May Day are both May 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidaySet {
    year: i32,
    holidays: Vec<Holiday>,
}

impl HolidaySet {
    /// The year these holidays belong to.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the set holds no entries.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }

    /// Returns true if any holiday falls on `date`.
    pub fn contains(&self, date: CalendarDate) -> bool {
        self.holidays.iter().any(|h| h.date == date)
    }

    /// Date of a specific holiday.
    pub fn date_of(&self, kind: HolidayKind) -> Option<CalendarDate> {
        self.holidays.iter().find(|h| h.kind == kind).map(|h| h.date)
    }

    /// Holidays falling on `date`.
    pub fn on(&self, date: CalendarDate) -> impl Iterator<Item = &Holiday> {
        self.holidays.iter().filter(move |h| h.date == date)
    }

    /// Iterates the entries.
    pub fn iter(&self) -> std::slice::Iter<'_, Holiday> {
        self.holidays.iter()
    }

    /// The dates of every entry, in generation order.
    pub fn dates(&self) -> Vec<CalendarDate> {
        self.holidays.iter().map(|h| h.date).collect()
    }
}

impl IntoIterator for HolidaySet {
    type Item = Holiday;
    type IntoIter = std::vec::IntoIter<Holiday>;

    fn into_iter(self) -> Self::IntoIter {
        self.holidays.into_iter()
    }
}

impl<'a> IntoIterator for &'a HolidaySet {
    type Item = &'a Holiday;
    type IntoIter = std::slice::Iter<'a, Holiday>;

    fn into_iter(self) -> Self::IntoIter {
        self.holidays.iter()
    }
}

/// Greek public holiday calendar.
///
/// ## Holidays
///
/// - New Year's Day (January 1)
/// - Epiphany (January 6)
/// - Clean Monday (Easter - 48)
/// - Independence Day (March 25)
/// - Good Friday (Easter - 2)
/// - Easter Monday (Easter + 1)
/// - Labour Day (May 1, next Monday if weekend)
/// - Whit Monday (Easter + 50)
/// - Assumption (August 15)
/// - Ochi Day (October 28)
/// - Christmas Day (December 25)
/// - Synaxis of the Theotokos (December 26)
///
/// Easter is the Orthodox date. Apart from Labour Day no holiday is moved off
/// a weekend.
#[derive(Debug, Clone, Copy, Default)]
pub struct HolidayCalendar;

impl HolidayCalendar {
    /// Create a new holiday calendar.
    pub fn new() -> Self {
        Self
    }

    /// Generates the holidays of `year`.
    ///
    /// A fresh set is built on every call. Years outside
    /// `CalendarDate::MIN_YEAR..=CalendarDate::MAX_YEAR` are clamped into
    /// that range.
    pub fn holidays(&self, year: i32) -> HolidaySet {
        let year = year.clamp(CalendarDate::MIN_YEAR, CalendarDate::MAX_YEAR);
        let easter = orthodox_easter(year);

        let holidays = vec![
            fixed(year, 1, 1, HolidayKind::NewYearsDay),
            fixed(year, 1, 6, HolidayKind::Epiphany),
            from_easter(easter, -48, HolidayKind::CleanMonday),
            fixed(year, 3, 25, HolidayKind::IndependenceDay),
            from_easter(easter, -2, HolidayKind::GoodFriday),
            from_easter(easter, 1, HolidayKind::EasterMonday),
            labour_day(year),
            from_easter(easter, 50, HolidayKind::WhitMonday),
            fixed(year, 8, 15, HolidayKind::Assumption),
            fixed(year, 10, 28, HolidayKind::OchiDay),
            fixed(year, 12, 25, HolidayKind::ChristmasDay),
            fixed(year, 12, 26, HolidayKind::SynaxisOfTheTheotokos),
        ];

        log::trace!("generated {} holidays for {year}", holidays.len());

        HolidaySet { year, holidays }
    }

    /// Union of the holiday dates of every year `range` touches.
    pub fn holiday_union(&self, range: &LeaveRange) -> HashSet<CalendarDate> {
        range
            .years()
            .flat_map(|year| self.holidays(year).dates())
            .collect()
    }

    /// Holidays falling inside `range`, sorted by date.
    ///
    /// Holidays sharing a date are all listed.
    pub fn holidays_between(&self, range: &LeaveRange) -> Vec<Holiday> {
        let mut found: Vec<Holiday> = range
            .years()
            .flat_map(|year| self.holidays(year))
            .filter(|h| range.contains(h.date))
            .collect();
        found.sort_by_key(|h| h.date);
        found
    }

    /// Distinct holiday dates inside `range`.
    pub fn holiday_dates_between(&self, range: &LeaveRange) -> BTreeSet<CalendarDate> {
        self.holidays_between(range)
            .into_iter()
            .map(|h| h.date)
            .collect()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &'static str {
        "Greek Public Holidays"
    }

    fn is_business_day(&self, date: CalendarDate) -> bool {
        date.is_weekday() && !self.holidays(date.year()).contains(date)
    }

    fn is_holiday(&self, date: CalendarDate) -> bool {
        self.holidays(date.year()).contains(date)
    }
}

fn fixed(year: i32, month: u32, day: u32, kind: HolidayKind) -> Holiday {
    let date = CalendarDate::from_ymd(year, month, day)
        .expect("fixed holidays are valid dates in every supported year");
    Holiday { date, kind }
}

fn from_easter(easter: CalendarDate, offset_days: i64, kind: HolidayKind) -> Holiday {
    // easter is between April 4 and May 9, so offsets of -48..=50 stay in the year
    let date = easter
        .checked_add_days(offset_days)
        .expect("easter-relative holidays stay inside the year");
    Holiday { date, kind }
}

fn labour_day(year: i32) -> Holiday {
    let may_day = fixed(year, 5, 1, HolidayKind::LabourDay);
    if may_day.date.is_weekend() {
        let date = may_day.date.next_monday().unwrap_or(may_day.date);
        Holiday { date, ..may_day }
    } else {
        may_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_count() {
        let cal = HolidayCalendar::new();
        for year in [1900, 2021, 2024, 2099] {
            assert_eq!(cal.holidays(year).len(), HOLIDAYS_PER_YEAR);
        }
    }

    #[test]
    fn test_fixed_holidays() {
        let set = HolidayCalendar.holidays(2025);
        for (m, day) in [(1, 1), (1, 6), (3, 25), (8, 15), (10, 28), (12, 25), (12, 26)] {
            assert!(set.contains(d(2025, m, day)), "{m}-{day}");
        }
    }

    #[test]
    fn test_movable_holidays_2024() {
        let set = HolidayCalendar.holidays(2024);
        assert_eq!(set.date_of(HolidayKind::CleanMonday), Some(d(2024, 3, 18)));
        assert_eq!(set.date_of(HolidayKind::GoodFriday), Some(d(2024, 5, 3)));
        assert_eq!(set.date_of(HolidayKind::EasterMonday), Some(d(2024, 5, 6)));
        assert_eq!(set.date_of(HolidayKind::WhitMonday), Some(d(2024, 6, 24)));
    }

    #[test]
    fn test_may_day_shift() {
        // 2021: May 1 is a Saturday
        let set = HolidayCalendar.holidays(2021);
        assert!(set.contains(d(2021, 5, 3)));
        assert!(!set.contains(d(2021, 5, 1)));

        // 2022: May 1 is a Sunday
        let set = HolidayCalendar.holidays(2022);
        assert_eq!(set.date_of(HolidayKind::LabourDay), Some(d(2022, 5, 2)));

        // 2024: May 1 is a Wednesday
        let set = HolidayCalendar.holidays(2024);
        assert_eq!(set.date_of(HolidayKind::LabourDay), Some(d(2024, 5, 1)));
    }

    #[test]
    fn test_duplicates_kept() {
        // 2021: Easter Monday and shifted Labour Day are both May 3
        let set = HolidayCalendar.holidays(2021);
        assert_eq!(set.len(), HOLIDAYS_PER_YEAR);
        assert_eq!(set.on(d(2021, 5, 3)).count(), 2);
    }

    #[test]
    fn test_weekend_holidays_not_moved() {
        // 2024-01-06 is a Saturday
        let set = HolidayCalendar.holidays(2024);
        assert_eq!(set.date_of(HolidayKind::Epiphany), Some(d(2024, 1, 6)));
    }

    #[test]
    fn test_all_within_year() {
        let cal = HolidayCalendar;
        for year in 1900..=2100 {
            for h in &cal.holidays(year) {
                assert_eq!(h.date.year(), year, "{:?} in {year}", h.kind);
            }
        }
    }

    #[test]
    fn test_holidays_between_spans_years() {
        let range = LeaveRange::new(d(2023, 12, 24), d(2024, 1, 7)).unwrap();
        let kinds: Vec<_> = HolidayCalendar
            .holidays_between(&range)
            .into_iter()
            .map(|h| h.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                HolidayKind::ChristmasDay,
                HolidayKind::SynaxisOfTheTheotokos,
                HolidayKind::NewYearsDay,
                HolidayKind::Epiphany,
            ]
        );
    }

    #[test]
    fn test_calendar_trait() {
        let cal = HolidayCalendar;
        assert!(!cal.is_business_day(d(2025, 3, 25)));
        assert!(cal.is_holiday(d(2025, 3, 25)));
        assert!(cal.is_business_day(d(2025, 3, 26)));
        // Weekend, not a holiday
        assert!(!cal.is_business_day(d(2025, 3, 29)));
        assert!(!cal.is_holiday(d(2025, 3, 29)));
    }

    #[test]
    fn test_out_of_range_year_clamped() {
        let set = HolidayCalendar.holidays(-50);
        assert_eq!(set.year(), CalendarDate::MIN_YEAR);
        assert_eq!(set.len(), HOLIDAYS_PER_YEAR);
    }
}
