//! Application configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use leave_core::calendars::WeekStart;
use leave_core::types::{
    CalendarDate, ALLOWANCE_OPTIONS, DB_DATE_FORMAT, DEFAULT_ALLOWANCE, SHOW_DATE_FORMAT,
};

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Environment variable for [`LeaveConfig::app_id`].
pub const ENV_APP_ID: &str = "LEAVE_APP_ID";
/// Environment variable for [`LeaveConfig::cluster_name`].
pub const ENV_CLUSTER_NAME: &str = "LEAVE_CLUSTER_NAME";
/// Environment variable for [`LeaveConfig::database_name`].
pub const ENV_DATABASE_NAME: &str = "LEAVE_DATABASE_NAME";
/// Environment variable for [`LeaveConfig::collection_name`].
pub const ENV_COLLECTION_NAME: &str = "LEAVE_COLLECTION_NAME";
/// Environment variable for [`LeaveConfig::storage_path`].
pub const ENV_STORAGE_PATH: &str = "LEAVE_STORAGE_PATH";
/// Environment variable for [`LeaveConfig::default_allowance`].
pub const ENV_DEFAULT_ALLOWANCE: &str = "LEAVE_DEFAULT_ALLOWANCE";
/// Environment variable for [`LeaveConfig::week_start`].
pub const ENV_WEEK_START: &str = "LEAVE_WEEK_START";

/// Sample date used to check that a format string round-trips.
const FORMAT_PROBE: (i32, u32, u32) = (2024, 5, 6);

/// Leave tracker configuration.
///
/// Every field has a default, so an empty TOML file is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveConfig {
    /// Identifier of the hosted application backing the data.
    #[serde(default)]
    pub app_id: String,

    /// Cluster holding the leave database.
    #[serde(default)]
    pub cluster_name: String,

    /// Database name.
    #[serde(default)]
    pub database_name: String,

    /// Collection (table) holding leave records.
    #[serde(default)]
    pub collection_name: String,

    /// Local database file; the CLI picks a per-user location when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,

    /// Allowance for users without a stored one.
    #[serde(default = "default_allowance")]
    pub default_allowance: u32,

    /// Allowances a user may choose from.
    #[serde(default = "default_allowance_options")]
    pub allowance_options: Vec<u32>,

    /// First column of calendar views.
    #[serde(default)]
    pub week_start: WeekStart,

    /// Format tried first when parsing typed dates.
    ///
    /// Stored dates and machine output always use `yyyy-MM-dd`.
    #[serde(default = "default_input_date_format")]
    pub input_date_format: String,

    /// Format of dates shown to users.
    #[serde(default = "default_show_date_format")]
    pub show_date_format: String,
}

fn default_allowance() -> u32 {
    DEFAULT_ALLOWANCE
}

fn default_allowance_options() -> Vec<u32> {
    ALLOWANCE_OPTIONS.to_vec()
}

fn default_input_date_format() -> String {
    DB_DATE_FORMAT.to_string()
}

fn default_show_date_format() -> String {
    SHOW_DATE_FORMAT.to_string()
}

impl Default for LeaveConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            cluster_name: String::new(),
            database_name: String::new(),
            collection_name: String::new(),
            storage_path: None,
            default_allowance: default_allowance(),
            allowance_options: default_allowance_options(),
            week_start: WeekStart::default(),
            input_date_format: default_input_date_format(),
            show_date_format: default_show_date_format(),
        }
    }
}

impl LeaveConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file does not exist, or a
    /// deserialization error if it is not valid TOML for this type.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Renders the configuration as TOML.
    pub fn to_toml(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        log::info!("wrote configuration to {}", path.display());
        Ok(())
    }

    /// Loads the effective configuration.
    ///
    /// Starts from `path` when given (defaults otherwise), applies
    /// `LEAVE_*` environment overrides and validates the result.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`LeaveConfig::load`] with an explicit environment lookup.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => {
                log::debug!("loading configuration from {}", path.display());
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_env_with(lookup)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Applies `LEAVE_*` overrides from the process environment.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_env_with(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an environment lookup.
    ///
    /// Unset variables leave the current value in place.
    pub fn apply_env_with<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, field) in [
            (ENV_APP_ID, &mut self.app_id),
            (ENV_CLUSTER_NAME, &mut self.cluster_name),
            (ENV_DATABASE_NAME, &mut self.database_name),
            (ENV_COLLECTION_NAME, &mut self.collection_name),
        ] {
            if let Some(value) = lookup(var) {
                *field = value;
            }
        }

        if let Some(value) = lookup(ENV_STORAGE_PATH).filter(|v| !v.is_empty()) {
            self.storage_path = Some(PathBuf::from(value));
        }

        if let Some(value) = lookup(ENV_DEFAULT_ALLOWANCE) {
            self.default_allowance =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::Environment {
                        var: ENV_DEFAULT_ALLOWANCE.to_string(),
                        message: format!("'{value}' is not a whole number of days"),
                    })?;
        }

        if let Some(value) = lookup(ENV_WEEK_START) {
            self.week_start = value.parse().map_err(|e| ConfigError::Environment {
                var: ENV_WEEK_START.to_string(),
                message: format!("{e}"),
            })?;
        }

        Ok(())
    }

    /// Parses a typed date, trying the input format then the display format.
    pub fn parse_date(&self, s: &str) -> Option<CalendarDate> {
        CalendarDate::parse_with(s, &self.input_date_format)
            .or_else(|_| CalendarDate::parse_with(s, &self.show_date_format))
            .ok()
    }

    /// Formats a date for display, falling back to `yyyy-MM-dd`.
    pub fn show_date(&self, date: CalendarDate) -> String {
        date.format_with(&self.show_date_format)
            .unwrap_or_else(|_| date.to_string())
    }
}

/// Checks that `format` renders a date that parses back to itself.
fn check_date_format(field: &str, format: &str) -> Option<ValidationError> {
    let (y, m, d) = FORMAT_PROBE;
    let probe = CalendarDate::from_ymd(y, m, d).ok()?;
    let round_trips = probe
        .format_with(format)
        .ok()
        .and_then(|text| CalendarDate::parse_with(&text, format).ok())
        == Some(probe);

    (!round_trips).then(|| {
        ValidationError::with_rule(
            field,
            format!("'{format}' does not identify a calendar day"),
            "round_trip",
        )
    })
}

impl Validate for LeaveConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.allowance_options.is_empty() {
            errors.push(ValidationError::new(
                "allowance_options",
                "At least one allowance option is required",
            ));
        }

        if self.allowance_options.contains(&0) {
            errors.push(ValidationError::with_rule(
                "allowance_options",
                "Allowance options must be positive",
                "positive",
            ));
        }

        if !self.allowance_options.contains(&self.default_allowance) {
            errors.push(ValidationError::with_rule(
                "default_allowance",
                format!(
                    "Default allowance {} is not one of {:?}",
                    self.default_allowance, self.allowance_options
                ),
                "in_options",
            ));
        }

        errors.extend(check_date_format(
            "input_date_format",
            &self.input_date_format,
        ));
        errors.extend(check_date_format(
            "show_date_format",
            &self.show_date_format,
        ));

        errors
    }
}
