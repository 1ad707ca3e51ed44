//! CLI command implementations.

pub mod calendar;
pub mod config;
pub mod days;
pub mod holidays;
pub mod leave;
pub mod summary;

// Re-export submodules for convenience
pub use calendar::CalendarArgs;
pub use config::ConfigArgs;
pub use days::DaysArgs;
pub use holidays::{EasterArgs, HolidaysArgs};
pub use leave::{AddArgs, DeleteArgs, EditArgs, ListArgs};
pub use summary::{AllowanceArgs, BalanceArgs, YearsArgs};

use std::path::{Path, PathBuf};

use leave_config::LeaveConfig;
use leave_core::types::CalendarDate;
use leave_storage::{AllowancePolicy, LeaveLedger, RedbStorage};

use crate::cli::{GlobalArgs, OutputFormat};
use crate::error::{CliError, CliResult};

/// Settings shared by every command.
#[derive(Debug)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Effective configuration.
    pub config: LeaveConfig,
    /// File the configuration was read from, if any.
    pub config_path: Option<PathBuf>,
    /// `--data` override.
    pub data: Option<PathBuf>,
    /// Current user.
    pub user: String,
}

impl Context {
    /// Resolves configuration for a parsed command line.
    ///
    /// An explicit `--config` file must exist; otherwise the per-user file is
    /// read when present and defaults are used when it is not.
    pub fn from_args(global: &GlobalArgs) -> CliResult<Self> {
        let config_path = config_file(global);
        let config = LeaveConfig::load(config_path.as_deref())?;

        Ok(Self {
            format: global.format,
            quiet: global.quiet,
            config,
            config_path,
            data: global.data.clone(),
            user: global.user.clone(),
        })
    }

    /// Database file to use: `--data`, then the configured path, then the
    /// per-user data directory.
    pub fn storage_path(&self) -> PathBuf {
        self.data
            .clone()
            .or_else(|| self.config.storage_path.clone())
            .or_else(|| dirs::data_dir().map(|d| d.join("leave").join("leave.redb")))
            .unwrap_or_else(|| PathBuf::from("leave.redb"))
    }

    /// Opens the ledger over the configured database.
    pub fn ledger(&self) -> CliResult<LeaveLedger<RedbStorage>> {
        let path = self.storage_path();
        tracing::debug!(path = %path.display(), "opening leave database");
        let storage = RedbStorage::open(&path)?;
        let policy = AllowancePolicy {
            default_allowance: self.config.default_allowance,
            options: self.config.allowance_options.clone(),
        };
        Ok(LeaveLedger::with_policy(storage, policy))
    }

    /// Parses a date typed by the user.
    pub fn parse_date(&self, s: &str) -> CliResult<CalendarDate> {
        self.config
            .parse_date(s)
            .ok_or_else(|| CliError::InvalidDate(s.to_string()))
    }

    /// Formats a date for display.
    pub fn show_date(&self, date: CalendarDate) -> String {
        self.config.show_date(date)
    }

    /// True when decorated, human-oriented output is wanted.
    pub fn is_table(&self) -> bool {
        self.format == OutputFormat::Table
    }
}

/// Configuration file to read: `--config`, else the per-user file if it exists.
pub fn config_file(global: &GlobalArgs) -> Option<PathBuf> {
    match &global.config {
        Some(path) => Some(path.clone()),
        None => default_config_path().filter(|p| p.exists()),
    }
}

/// Per-user configuration file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("leave").join("config.toml"))
}

/// Parser for year arguments, limited to the years dates can represent.
pub fn year_parser() -> clap::builder::RangedI64ValueParser<i32> {
    clap::value_parser!(i32)
        .range(i64::from(CalendarDate::MIN_YEAR)..=i64::from(CalendarDate::MAX_YEAR))
}

/// Year of today's date, used when no year is given.
pub fn current_year() -> i32 {
    CalendarDate::today().year()
}

/// Short English weekday name.
pub fn weekday_name(date: CalendarDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

/// Displays a path, or a placeholder when absent.
pub fn display_path(path: Option<&Path>) -> String {
    path.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_both_encodings() {
        let ctx = test_support::context();
        let expected = CalendarDate::from_ymd(2024, 5, 6).unwrap();
        assert_eq!(ctx.parse_date("2024-05-06").unwrap(), expected);
        assert_eq!(ctx.parse_date("06-05-2024").unwrap(), expected);
        assert!(matches!(
            ctx.parse_date("2024-13-01"),
            Err(CliError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_storage_path_precedence() {
        let mut ctx = test_support::context();
        ctx.config.storage_path = Some(PathBuf::from("from-config.redb"));
        assert_eq!(ctx.storage_path(), PathBuf::from("from-config.redb"));

        ctx.data = Some(PathBuf::from("from-flag.redb"));
        assert_eq!(ctx.storage_path(), PathBuf::from("from-flag.redb"));
    }

    #[test]
    fn test_weekday_name() {
        assert_eq!(
            weekday_name(CalendarDate::from_ymd(2024, 5, 6).unwrap()),
            "Mon"
        );
    }
}
