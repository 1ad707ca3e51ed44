//! Config command implementation.
//!
//! Shows the effective configuration and creates or checks config files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use leave_config::{LeaveConfig, Validate};

use super::{config_file, default_config_path, display_path, Context};
use crate::cli::{GlobalArgs, OutputFormat};
use crate::error::CliError;
use crate::output::{print_header, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show the configuration and database file locations
    Path,

    /// Write a configuration file with default settings
    Init(InitArgs),

    /// Validate a configuration file
    Check,
}

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
///
/// Runs before the shared context is built so that `check` can report on a
/// file that would fail to load.
pub fn execute(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show => execute_show(&Context::from_args(global)?),
        ConfigCommand::Path => execute_path(&Context::from_args(global)?),
        ConfigCommand::Init(init) => execute_init(init, global),
        ConfigCommand::Check => execute_check(global),
    }
}

fn config_rows(config: &LeaveConfig) -> Vec<KeyValue> {
    let options: Vec<String> = config
        .allowance_options
        .iter()
        .map(ToString::to_string)
        .collect();
    vec![
        KeyValue::new("app_id", &config.app_id),
        KeyValue::new("cluster_name", &config.cluster_name),
        KeyValue::new("database_name", &config.database_name),
        KeyValue::new("collection_name", &config.collection_name),
        KeyValue::new("storage_path", display_path(config.storage_path.as_deref())),
        KeyValue::new("default_allowance", config.default_allowance),
        KeyValue::new("allowance_options", options.join(",")),
        KeyValue::new("week_start", config.week_start),
        KeyValue::new("input_date_format", &config.input_date_format),
        KeyValue::new("show_date_format", &config.show_date_format),
    ]
}

/// Show the effective configuration.
fn execute_show(ctx: &Context) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&ctx.config)?);
        }
        format => {
            if format == OutputFormat::Table && !ctx.quiet {
                print_header("Current Configuration");
            }
            print_output(&config_rows(&ctx.config), format)?;
        }
    }
    Ok(())
}

/// Show file locations.
fn execute_path(ctx: &Context) -> Result<()> {
    let rows = vec![
        KeyValue::new("config", display_path(ctx.config_path.as_deref())),
        KeyValue::new("default_config", display_path(default_config_path().as_deref())),
        KeyValue::new("database", ctx.storage_path().display()),
    ];
    print_output(&rows, ctx.format)
}

fn target_path(global: &GlobalArgs) -> Result<PathBuf> {
    global
        .config
        .clone()
        .or_else(default_config_path)
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory; pass --config"))
}

/// Write a default configuration file.
fn execute_init(args: InitArgs, global: &GlobalArgs) -> Result<()> {
    let path = target_path(global)?;
    if path.exists() && !args.force {
        anyhow::bail!(
            "{} already exists; use --force to overwrite",
            path.display()
        );
    }

    LeaveConfig::default()
        .save(&path)
        .map_err(CliError::from)?;
    if !global.quiet {
        print_success(&format!("Wrote {}", path.display()));
    }
    Ok(())
}

/// Validate the configuration file, listing every problem found.
fn execute_check(global: &GlobalArgs) -> Result<()> {
    let path = config_file(global);

    let mut config = match &path {
        Some(path) => LeaveConfig::from_file(path).map_err(CliError::from)?,
        None => LeaveConfig::default(),
    };
    config.apply_env().map_err(CliError::from)?;

    let errors = config.validate();
    if errors.is_empty() {
        if !global.quiet {
            print_success(&format!(
                "Configuration is valid ({})",
                display_path(path.as_deref())
            ));
        }
        return Ok(());
    }

    for error in &errors {
        print_warning(&error.to_string());
    }
    anyhow::bail!("{} configuration problem(s) found", errors.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_rows_cover_every_setting() {
        let rows = config_rows(&LeaveConfig::default());
        assert_eq!(rows.len(), 10);
        let week = rows.iter().find(|r| r.key == "week_start").unwrap();
        assert_eq!(week.value, "monday");
        let storage = rows.iter().find(|r| r.key == "storage_path").unwrap();
        assert_eq!(storage.value, "(none)");
    }
}
