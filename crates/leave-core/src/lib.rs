//! # Leave Core
//!
//! Date types, the public holiday calendar and working-day counting for the
//! Leave annual-leave tracker.
//!
//! This crate provides the building blocks used throughout Leave:
//!
//! - **Types**: `CalendarDate` and the inclusive `LeaveRange`
//! - **Calendars**: Orthodox Easter, the yearly public holiday set, month grids
//! - **Working days**: How many leave days a date range consumes
//!
//! ## Example
//!
//! ```rust
//! use leave_core::prelude::*;
//!
//! let easter = orthodox_easter(2024);
//! assert_eq!(easter, CalendarDate::from_ymd(2024, 5, 5).unwrap());
//!
//! let from = CalendarDate::parse("2024-01-01").ok();
//! let until = CalendarDate::parse("2024-01-07").ok();
//! assert_eq!(calculate_working_days(from, until), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::unreadable_literal)]

pub mod calendars;
pub mod error;
pub mod types;
pub mod workdays;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{
        orthodox_easter, Calendar, Holiday, HolidayCalendar, HolidayKind, HolidaySet,
        MonthGrid, WeekStart, WeekendCalendar,
    };
    pub use crate::error::{LeaveError, LeaveResult};
    pub use crate::types::{CalendarDate, LeaveRange};
    pub use crate::workdays::{
        calculate_working_days, calculate_working_days_str, DayBreakdown, WorkingDaysCalculator,
    };
}

// Re-export commonly used types at crate root
pub use error::{LeaveError, LeaveResult};
pub use types::{CalendarDate, LeaveRange};
