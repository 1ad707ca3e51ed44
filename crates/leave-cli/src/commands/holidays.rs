//! Holiday and Easter commands.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use leave_core::calendars::{orthodox_easter, Holiday, HolidayCalendar};
use leave_core::types::{CalendarDate, LeaveRange};

use super::{current_year, weekday_name, year_parser, Context};
use crate::output::{print_header, print_output, Minimal};

/// Arguments for the holidays command.
#[derive(Args, Debug)]
pub struct HolidaysArgs {
    /// Year to list. Defaults to the current year.
    #[arg(value_parser = year_parser(), conflicts_with = "from")]
    pub year: Option<i32>,

    /// List holidays from this date instead of a whole year
    #[arg(long, requires = "until")]
    pub from: Option<String>,

    /// Last date of the --from range
    #[arg(long, requires = "from")]
    pub until: Option<String>,
}

/// Arguments for the easter command.
#[derive(Args, Debug)]
pub struct EasterArgs {
    /// First year. Defaults to the current year.
    #[arg(value_parser = year_parser())]
    pub year: Option<i32>,

    /// Number of consecutive years to show
    #[arg(short = 'n', long, default_value = "1")]
    pub count: u16,
}

/// A holiday row.
#[derive(Debug, Serialize, Tabled)]
struct HolidayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    weekday: &'static str,
    #[tabled(rename = "Holiday")]
    name: &'static str,
    #[tabled(rename = "Movable")]
    movable: bool,
}

impl Minimal for HolidayRow {
    fn minimal(&self) -> String {
        self.date.clone()
    }
}

/// An Easter row.
#[derive(Debug, Serialize, Tabled)]
struct EasterRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Easter Sunday")]
    date: String,
}

impl Minimal for EasterRow {
    fn minimal(&self) -> String {
        self.date.clone()
    }
}

fn holiday_row(ctx: &Context, holiday: &Holiday) -> HolidayRow {
    // Machine formats keep the storage encoding
    let date = if ctx.is_table() {
        ctx.show_date(holiday.date)
    } else {
        holiday.date.to_string()
    };
    HolidayRow {
        date,
        weekday: weekday_name(holiday.date),
        name: holiday.kind.name(),
        movable: holiday.kind.is_movable(),
    }
}

/// Execute the holidays command.
pub fn execute_holidays(args: HolidaysArgs, ctx: &Context) -> Result<()> {
    let calendar = HolidayCalendar::new();

    let (title, mut holidays): (String, Vec<Holiday>) = match (&args.from, &args.until) {
        (Some(from), Some(until)) => {
            let range = LeaveRange::new(ctx.parse_date(from)?, ctx.parse_date(until)?)?;
            let title = format!(
                "Public holidays {} to {}",
                ctx.show_date(range.from()),
                ctx.show_date(range.until())
            );
            (title, calendar.holidays_between(&range))
        }
        _ => {
            let year = args.year.unwrap_or_else(current_year);
            let set = calendar.holidays(year);
            (format!("Public holidays {}", set.year()), set.into_iter().collect())
        }
    };
    holidays.sort_by_key(|h| h.date);

    let rows: Vec<HolidayRow> = holidays.iter().map(|h| holiday_row(ctx, h)).collect();
    if ctx.is_table() && !ctx.quiet {
        print_header(&title);
    }
    print_output(&rows, ctx.format)
}

/// Execute the easter command.
pub fn execute_easter(args: EasterArgs, ctx: &Context) -> Result<()> {
    let first = args.year.unwrap_or_else(current_year);
    let last = first
        .saturating_add(i32::from(args.count.max(1)) - 1)
        .min(CalendarDate::MAX_YEAR);
    let rows: Vec<EasterRow> = (first..=last)
        .map(|year| {
            let date = orthodox_easter(year);
            EasterRow {
                year: date.year(),
                date: if ctx.is_table() {
                    ctx.show_date(date)
                } else {
                    date.to_string()
                },
            }
        })
        .collect();

    print_output(&rows, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use leave_core::calendars::HolidayKind;

    #[test]
    fn test_holiday_row_formats() {
        let mut ctx = context();
        let holiday = Holiday {
            date: CalendarDate::from_ymd(2024, 3, 25).unwrap(),
            kind: HolidayKind::IndependenceDay,
        };

        let row = holiday_row(&ctx, &holiday);
        assert_eq!(row.date, "2024-03-25");
        assert_eq!(row.weekday, "Mon");
        assert!(!row.movable);

        ctx.format = crate::cli::OutputFormat::Table;
        assert_eq!(holiday_row(&ctx, &holiday).date, "25-03-2024");
    }

    #[derive(clap::Parser, Debug)]
    struct Harness {
        #[command(subcommand)]
        command: Sub,
    }

    #[derive(clap::Subcommand, Debug)]
    enum Sub {
        Holidays(HolidaysArgs),
        Easter(EasterArgs),
    }

    #[test]
    fn test_years_outside_date_range_rejected() {
        use clap::Parser;
        assert!(Harness::try_parse_from(["t", "holidays", "0"]).is_err());
        assert!(Harness::try_parse_from(["t", "easter", "10000"]).is_err());
        assert!(Harness::try_parse_from(["t", "holidays", "9999"]).is_ok());
        assert!(Harness::try_parse_from(["t", "easter", "1"]).is_ok());
    }

    #[test]
    fn test_year_conflicts_with_range() {
        use clap::Parser;
        let err = Harness::try_parse_from([
            "t", "holidays", "2024", "--from", "2025-01-01", "--until", "2025-12-31",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }
}
