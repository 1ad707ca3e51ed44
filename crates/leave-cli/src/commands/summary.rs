//! Balance, years and allowance commands.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::{current_year, year_parser, Context};
use crate::error::CliError;
use crate::output::{print_output, print_single, print_success, KeyValue, Minimal};

/// Arguments for the balance command.
#[derive(Args, Debug)]
pub struct BalanceArgs {
    /// Allowance year. Defaults to the current year.
    #[arg(short, long, value_parser = year_parser())]
    pub year: Option<i32>,
}

/// Arguments for the years command.
#[derive(Args, Debug)]
pub struct YearsArgs {
    /// Year always offered even without records. Defaults to the current year.
    #[arg(long, value_parser = year_parser())]
    pub current: Option<i32>,
}

/// Arguments for the allowance command.
#[derive(Args, Debug)]
pub struct AllowanceArgs {
    /// New yearly allowance. Omit to show the current one.
    pub total: Option<u32>,
}

/// A year with its taken days.
#[derive(Debug, Serialize, Tabled)]
struct YearRow {
    #[tabled(rename = "Year")]
    year: i32,
    #[tabled(rename = "Taken")]
    taken: u32,
    #[tabled(rename = "Remaining")]
    remaining: i64,
}

impl Minimal for YearRow {
    fn minimal(&self) -> String {
        self.year.to_string()
    }
}

/// A user's allowance and the values it may take.
#[derive(Debug, Serialize)]
struct AllowanceSummary {
    owner_id: String,
    total_leaves: u32,
    options: String,
}

/// Execute the balance command.
pub fn execute_balance(args: BalanceArgs, ctx: &Context) -> Result<()> {
    let year = args.year.unwrap_or_else(current_year);
    let ledger = ctx.ledger()?;
    let balance = ledger
        .balance(&ctx.user, year)
        .map_err(CliError::from)?;

    let remaining = if balance.is_overdrawn() && ctx.is_table() {
        balance.remaining.to_string().red().to_string()
    } else {
        balance.remaining.to_string()
    };
    let rows = vec![
        KeyValue::new("User", &ctx.user),
        KeyValue::new("Year", balance.year),
        KeyValue::new("Allowance", balance.allowance),
        KeyValue::new("Taken", balance.taken),
        KeyValue::new("Remaining", remaining),
    ];
    print_single(&balance, &rows, &balance.remaining.to_string(), ctx.format)
}

/// Execute the years command.
pub fn execute_years(args: YearsArgs, ctx: &Context) -> Result<()> {
    let current = args.current.unwrap_or_else(current_year);
    let ledger = ctx.ledger()?;

    let mut rows = Vec::new();
    for year in ledger
        .year_options(&ctx.user, current)
        .map_err(CliError::from)?
    {
        let balance = ledger.balance(&ctx.user, year).map_err(CliError::from)?;
        rows.push(YearRow {
            year,
            taken: balance.taken,
            remaining: balance.remaining,
        });
    }

    print_output(&rows, ctx.format)
}

/// Execute the allowance command.
pub fn execute_allowance(args: AllowanceArgs, ctx: &Context) -> Result<()> {
    let ledger = ctx.ledger()?;

    let total = match args.total {
        Some(total) => {
            let profile = ledger
                .set_allowance(&ctx.user, total)
                .map_err(CliError::from)?;
            if ctx.is_table() && !ctx.quiet {
                print_success(&format!(
                    "Allowance for {} set to {} day(s)",
                    profile.owner_id, profile.total_leaves
                ));
                return Ok(());
            }
            profile.total_leaves
        }
        None => ledger.allowance(&ctx.user).map_err(CliError::from)?,
    };

    let summary = AllowanceSummary {
        owner_id: ctx.user.clone(),
        total_leaves: total,
        options: ledger
            .policy()
            .options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(","),
    };
    let rows = vec![
        KeyValue::new("User", &summary.owner_id),
        KeyValue::new("Allowance", summary.total_leaves),
        KeyValue::new("Options", &summary.options),
    ];
    print_single(&summary, &rows, &total.to_string(), ctx.format)
}
