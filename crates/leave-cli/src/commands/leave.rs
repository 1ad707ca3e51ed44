//! Leave record commands: add, edit, delete and list.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use leave_core::types::CalendarDate;
use leave_storage::{LeaveRecord, StorageAdapter};

use super::{current_year, year_parser, Context};
use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_output, print_success, Minimal};

/// Arguments for the add command.
#[derive(Args, Debug)]
pub struct AddArgs {
    /// First day of leave
    pub from: String,

    /// Last day of leave, inclusive
    pub until: String,

    /// Allowance year to charge. Defaults to the year of the first day.
    #[arg(short, long, value_parser = year_parser())]
    pub year: Option<i32>,
}

/// Arguments for the edit command.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// Leave id (as shown by `leave list`)
    pub id: String,

    /// New first day
    pub from: String,

    /// New last day, inclusive
    pub until: String,

    /// Allowance year to charge. Defaults to the record's current year.
    #[arg(short, long, value_parser = year_parser())]
    pub year: Option<i32>,
}

/// Arguments for the delete command.
#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Leave id (as shown by `leave list`)
    pub id: String,
}

/// Arguments for the list command.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Allowance year. Defaults to the current year.
    #[arg(short, long, value_parser = year_parser())]
    pub year: Option<i32>,
}

/// A leave record row.
#[derive(Debug, Serialize, Tabled)]
struct LeaveRow {
    #[tabled(rename = "Id")]
    id: Uuid,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Until")]
    until: String,
    #[tabled(rename = "Days")]
    days: u32,
    #[tabled(rename = "Year")]
    year: i32,
}

impl Minimal for LeaveRow {
    fn minimal(&self) -> String {
        format!("{} {} {} {}", self.id, self.from, self.until, self.days)
    }
}

fn leave_row(ctx: &Context, record: &LeaveRecord) -> LeaveRow {
    let show = |date: CalendarDate| {
        if ctx.is_table() {
            ctx.show_date(date)
        } else {
            date.to_string()
        }
    };
    LeaveRow {
        id: record.id,
        from: show(record.from),
        until: show(record.until),
        days: record.days,
        year: record.year,
    }
}

fn parse_id(s: &str) -> CliResult<Uuid> {
    Uuid::parse_str(s.trim()).map_err(|_| CliError::InvalidId(s.to_string()))
}

/// Prints a written record: its id for minimal output, a row otherwise.
fn print_record(ctx: &Context, record: &LeaveRecord, verb: &str) -> Result<()> {
    match ctx.format {
        OutputFormat::Minimal => {
            println!("{}", record.id);
            Ok(())
        }
        OutputFormat::Table if !ctx.quiet => {
            print_success(&format!(
                "{} {} working day(s) of {} leave",
                verb, record.days, record.year
            ));
            print_output(&[leave_row(ctx, record)], ctx.format)
        }
        format => print_output(&[leave_row(ctx, record)], format),
    }
}

/// Execute the add command.
pub fn execute_add(args: AddArgs, ctx: &Context) -> Result<()> {
    let from = ctx.parse_date(&args.from)?;
    let until = ctx.parse_date(&args.until)?;
    let year = args.year.unwrap_or(from.year());

    let ledger = ctx.ledger()?;
    let record = ledger
        .record_leave(&ctx.user, year, from, until)
        .map_err(CliError::from)?;
    print_record(ctx, &record, "Recorded")
}

/// Execute the edit command.
pub fn execute_edit(args: EditArgs, ctx: &Context) -> Result<()> {
    let id = parse_id(&args.id)?;
    let from = ctx.parse_date(&args.from)?;
    let until = ctx.parse_date(&args.until)?;

    let ledger = ctx.ledger()?;
    let existing = ledger
        .storage()
        .get_leave(id)
        .map_err(CliError::from)?
        .filter(|r| r.owner_id == ctx.user)
        .ok_or(CliError::LeaveNotFound(id))?;
    let year = args.year.unwrap_or(existing.year);

    let record = ledger
        .edit_leave(id, year, from, until)
        .map_err(CliError::from)?;
    print_record(ctx, &record, "Updated to")
}

/// Execute the delete command.
pub fn execute_delete(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let id = parse_id(&args.id)?;
    let ledger = ctx.ledger()?;

    let owned = ledger
        .storage()
        .get_leave(id)
        .map_err(CliError::from)?
        .is_some_and(|r| r.owner_id == ctx.user);
    if !owned || !ledger.delete_leave(id).map_err(CliError::from)? {
        return Err(CliError::LeaveNotFound(id).into());
    }

    if !ctx.quiet {
        print_success(&format!("Deleted leave {}", id));
    }
    Ok(())
}

/// Execute the list command.
pub fn execute_list(args: ListArgs, ctx: &Context) -> Result<()> {
    let year = args.year.unwrap_or_else(current_year);
    let ledger = ctx.ledger()?;
    let records = ledger
        .leaves_for_year(&ctx.user, year)
        .map_err(CliError::from)?;

    let rows: Vec<LeaveRow> = records.iter().map(|r| leave_row(ctx, r)).collect();
    print_output(&rows, ctx.format)
}
