//! Calendar command implementation.
//!
//! Renders a month grid with weekends and holidays marked.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use leave_core::calendars::{DayStatus, HolidayCalendar, MonthGrid, WeekStart};
use leave_core::types::CalendarDate;

use super::{year_parser, Context};
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_output, Minimal};

/// Arguments for the calendar command.
#[derive(Args, Debug)]
pub struct CalendarArgs {
    /// Year. Defaults to the current year.
    #[arg(value_parser = year_parser())]
    pub year: Option<i32>,

    /// Month (1-12). Defaults to the current month.
    pub month: Option<u32>,

    /// First day of the week (monday or sunday). Defaults to the configured one.
    #[arg(short, long)]
    pub week_start: Option<WeekStart>,
}

/// One day of the month, for machine formats.
#[derive(Debug, Serialize, Tabled)]
struct CellRow {
    #[tabled(rename = "Date")]
    date: CalendarDate,
    #[tabled(rename = "Status")]
    status: &'static str,
}

impl Minimal for CellRow {
    fn minimal(&self) -> String {
        format!("{} {}", self.date, self.status)
    }
}

fn status_name(status: DayStatus) -> &'static str {
    match status {
        DayStatus::Working => "working",
        DayStatus::Weekend => "weekend",
        DayStatus::Holiday => "holiday",
    }
}

/// Renders the grid as plain text, one line per week.
fn render(grid: &MonthGrid) -> Vec<String> {
    let mut lines = Vec::with_capacity(grid.weeks.len() + 2);
    lines.push(format!("{} {}", grid.month_name(), grid.year));
    lines.push(grid.headers().join(" "));

    for week in &grid.weeks {
        let cells: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                None => "  ".to_string(),
                Some(cell) => {
                    let day = format!("{:>2}", cell.date.day());
                    match cell.status {
                        DayStatus::Working => day,
                        DayStatus::Weekend => day.dimmed().to_string(),
                        DayStatus::Holiday => day.red().bold().to_string(),
                    }
                }
            })
            .collect();
        lines.push(cells.join(" ").trim_end().to_string());
    }

    lines
}

/// Execute the calendar command.
pub fn execute(args: CalendarArgs, ctx: &Context) -> Result<()> {
    let today = CalendarDate::today();
    let year = args.year.unwrap_or(today.year());
    let month = args.month.unwrap_or(today.month());
    if !(1..=12).contains(&month) {
        return Err(CliError::InvalidMonth(month).into());
    }
    let week_start = args.week_start.unwrap_or(ctx.config.week_start);

    let grid = MonthGrid::new(year, month, week_start)?;

    match ctx.format {
        OutputFormat::Table => {
            for line in render(&grid) {
                println!("{}", line);
            }
            if !ctx.quiet {
                let holidays = HolidayCalendar::new().holidays(year);
                let mut in_month: Vec<_> = holidays
                    .iter()
                    .filter(|h| h.date.month() == month)
                    .collect();
                in_month.sort_by_key(|h| h.date);
                println!();
                for holiday in in_month {
                    println!("{}  {}", ctx.show_date(holiday.date), holiday.kind);
                }
                println!("Working days: {}", grid.working_days());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&grid)?);
        }
        OutputFormat::Csv => {
            let rows: Vec<CellRow> = grid
                .cells()
                .map(|c| CellRow {
                    date: c.date,
                    status: status_name(c.status),
                })
                .collect();
            print_output(&rows, ctx.format)?;
        }
        OutputFormat::Minimal => {
            println!("{}", grid.working_days());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_layout() {
        colored::control::set_override(false);
        // February 2021 starts on a Monday
        let grid = MonthGrid::new(2021, 2, WeekStart::Monday).unwrap();
        let lines = render(&grid);
        assert_eq!(lines[0], "February 2021");
        assert_eq!(lines[1], "Mo Tu We Th Fr Sa Su");
        assert_eq!(lines[2], " 1  2  3  4  5  6  7");
        assert_eq!(lines.len(), 6);

        let grid = MonthGrid::new(2021, 2, WeekStart::Sunday).unwrap();
        let lines = render(&grid);
        assert_eq!(lines[1], "Su Mo Tu We Th Fr Sa");
        assert_eq!(lines[2], "    1  2  3  4  5  6");
    }
}
