//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::{
    AddArgs, AllowanceArgs, BalanceArgs, CalendarArgs, ConfigArgs, DaysArgs, DeleteArgs,
    EasterArgs, EditArgs, HolidaysArgs, ListArgs, YearsArgs,
};

/// Leave - annual leave tracking with working-day calculation
#[derive(Parser, Debug)]
#[command(name = "leave")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags accepted before or after any subcommand.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "LEAVE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Database file
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// User whose leave is managed
    #[arg(short, long, global = true, env = "LEAVE_USER", default_value = "me")]
    pub user: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the public holidays of a year
    Holidays(HolidaysArgs),

    /// Show the Orthodox Easter Sunday of one or more years
    Easter(EasterArgs),

    /// Count the working days between two dates
    Days(DaysArgs),

    /// Show a month with weekends and holidays marked
    Calendar(CalendarArgs),

    /// Record a stretch of leave
    Add(AddArgs),

    /// Change the dates of recorded leave
    Edit(EditArgs),

    /// Delete recorded leave
    Delete(DeleteArgs),

    /// List recorded leave for a year
    List(ListArgs),

    /// Show allowance, taken and remaining days
    Balance(BalanceArgs),

    /// List years with recorded leave
    Years(YearsArgs),

    /// Show or change the yearly allowance
    Allowance(AllowanceArgs),

    /// Inspect and create configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the values)
    Minimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "leave", "days", "2024-01-01", "2024-01-07", "--format", "minimal", "-u", "maria",
        ])
        .unwrap();
        assert_eq!(cli.global.format, OutputFormat::Minimal);
        assert_eq!(cli.global.user, "maria");
        assert!(matches!(cli.command, Commands::Days(_)));
    }
}
