//! Days command implementation.
//!
//! Counts the working days a date range would consume.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use leave_core::types::{CalendarDate, LeaveRange};
use leave_core::workdays::{DayBreakdown, WorkingDaysCalculator};

use super::{weekday_name, Context};
use crate::output::{print_output, print_single, print_warning, KeyValue, Minimal};

/// Arguments for the days command.
#[derive(Args, Debug)]
pub struct DaysArgs {
    /// First day (YYYY-MM-DD or DD-MM-YYYY)
    pub from: String,

    /// Last day, inclusive
    pub until: String,

    /// List every working day instead of the totals
    #[arg(long)]
    pub dates: bool,
}

/// Totals for a range.
#[derive(Debug, Serialize)]
struct DaysSummary {
    from: CalendarDate,
    until: CalendarDate,
    calendar_days: u32,
    weekend_days: u32,
    holiday_days: u32,
    working_days: u32,
}

impl DaysSummary {
    fn new(from: CalendarDate, until: CalendarDate, breakdown: DayBreakdown) -> Self {
        Self {
            from,
            until,
            calendar_days: breakdown.calendar_days,
            weekend_days: breakdown.weekend_days,
            holiday_days: breakdown.holiday_days,
            working_days: breakdown.working_days,
        }
    }
}

/// One working day.
#[derive(Debug, Serialize, Tabled)]
struct WorkingDayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    weekday: &'static str,
}

impl Minimal for WorkingDayRow {
    fn minimal(&self) -> String {
        self.date.clone()
    }
}

/// Execute the days command.
pub fn execute(args: DaysArgs, ctx: &Context) -> Result<()> {
    let from = ctx.parse_date(&args.from)?;
    let until = ctx.parse_date(&args.until)?;
    let calculator = WorkingDaysCalculator::new();

    // An inverted range counts as zero working days
    let breakdown = match LeaveRange::new(from, until) {
        Ok(range) => {
            if args.dates {
                let rows: Vec<WorkingDayRow> = calculator
                    .working_dates(&range)
                    .into_iter()
                    .map(|date| WorkingDayRow {
                        date: if ctx.is_table() {
                            ctx.show_date(date)
                        } else {
                            date.to_string()
                        },
                        weekday: weekday_name(date),
                    })
                    .collect();
                return print_output(&rows, ctx.format);
            }
            calculator.breakdown(&range)
        }
        Err(err) => {
            if !ctx.quiet {
                print_warning(&err.to_string());
            }
            DayBreakdown::default()
        }
    };

    let summary = DaysSummary::new(from, until, breakdown);
    let rows = vec![
        KeyValue::new("From", ctx.show_date(from)),
        KeyValue::new("Until", ctx.show_date(until)),
        KeyValue::new("Calendar days", summary.calendar_days),
        KeyValue::new("Weekend days", summary.weekend_days),
        KeyValue::new("Holidays", summary.holiday_days),
        KeyValue::new("Working days", summary.working_days),
    ];
    print_single(&summary, &rows, &summary.working_days.to_string(), ctx.format)
}
