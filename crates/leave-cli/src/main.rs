//! Leave CLI - annual leave tracking with Greek public holidays.
//!
//! # Usage
//!
//! ```bash
//! # Working days between two dates
//! leave days 2024-07-01 2024-07-12
//!
//! # Public holidays and Orthodox Easter
//! leave holidays 2024
//! leave easter 2024 -n 5
//!
//! # A month with weekends and holidays marked
//! leave calendar 2024 5 --week-start sunday
//!
//! # Record leave and check the balance
//! leave add 2024-08-12 2024-08-23
//! leave balance --year 2024
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;

fn main() -> Result<()> {
    let Cli { global, command } = Cli::parse();

    // RUST_LOG wins over --verbose
    let default_filter = if global.verbose { "leave=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = match command {
        Commands::Config(args) => return commands::config::execute(args, &global),
        command => command,
    };

    let ctx = Context::from_args(&global)?;
    tracing::debug!(user = %ctx.user, config = ?ctx.config_path, "resolved settings");

    match command {
        Commands::Holidays(args) => commands::holidays::execute_holidays(args, &ctx)?,
        Commands::Easter(args) => commands::holidays::execute_easter(args, &ctx)?,
        Commands::Days(args) => commands::days::execute(args, &ctx)?,
        Commands::Calendar(args) => commands::calendar::execute(args, &ctx)?,
        Commands::Add(args) => commands::leave::execute_add(args, &ctx)?,
        Commands::Edit(args) => commands::leave::execute_edit(args, &ctx)?,
        Commands::Delete(args) => commands::leave::execute_delete(args, &ctx)?,
        Commands::List(args) => commands::leave::execute_list(args, &ctx)?,
        Commands::Balance(args) => commands::summary::execute_balance(args, &ctx)?,
        Commands::Years(args) => commands::summary::execute_years(args, &ctx)?,
        Commands::Allowance(args) => commands::summary::execute_allowance(args, &ctx)?,
        Commands::Config(_) => unreachable!("handled before context setup"),
    }

    Ok(())
}
