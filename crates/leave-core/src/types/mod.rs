//! Domain types for leave calculations.
//!
//! - [`CalendarDate`]: Local calendar date with day granularity
//! - [`LeaveRange`]: Inclusive, ordered pair of dates

mod date;
mod range;

pub use date::{to_show_date, CalendarDate, DB_DATE_FORMAT, SHOW_DATE_FORMAT};
pub use range::{Days, LeaveRange};

/// Yearly allowance given to users without a stored one.
pub const DEFAULT_ALLOWANCE: u32 = 20;

/// Yearly allowances a user may choose from.
pub const ALLOWANCE_OPTIONS: [u32; 5] = [20, 21, 22, 25, 26];
