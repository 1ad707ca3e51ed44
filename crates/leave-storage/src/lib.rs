//! Leave Storage Layer
//!
//! Persistence for the annual leave tracker: leave records, per-user
//! allowances, and the [`LeaveLedger`] that keeps recorded days in step with
//! the working-day calendar.
//!
//! # Example
//!
//! ```rust,no_run
//! use leave_core::types::CalendarDate;
//! use leave_storage::{LeaveLedger, RedbStorage};
//!
//! // Create or open a database
//! let storage = RedbStorage::open("./leave.redb")?;
//! let ledger = LeaveLedger::new(storage);
//!
//! let from = CalendarDate::parse("2024-07-01")?;
//! let until = CalendarDate::parse("2024-07-12")?;
//! ledger.record_leave("user-1", 2024, from, until)?;
//!
//! let balance = ledger.balance("user-1", 2024)?;
//! println!("{} day(s) left", balance.remaining);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Storage Backends
//!
//! ## RedbStorage (Default)
//!
//! Uses [redb](https://crates.io/crates/redb), a pure-Rust embedded database
//! with ACID transactions. Suitable for single-process applications.
//!
//! ## InMemoryStorage
//!
//! A simple in-memory implementation for testing.
//! Data is not persisted across restarts.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod adapter;
mod error;
mod ledger;
mod memory;
mod redb;
mod types;

// Re-export core types
pub use adapter::{LeaveFilter, StorageAdapter, StorageStats};
pub use error::{StorageError, StorageResult};
pub use ledger::{AllowancePolicy, LeaveLedger};
pub use memory::InMemoryStorage;
pub use redb::RedbStorage;
pub use types::{LeaveBalance, LeaveRecord, UserProfile};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::adapter::{LeaveFilter, StorageAdapter, StorageStats};
    pub use crate::error::{StorageError, StorageResult};
    pub use crate::ledger::{AllowancePolicy, LeaveLedger};
    pub use crate::memory::InMemoryStorage;
    pub use crate::redb::RedbStorage;
    pub use crate::types::{LeaveBalance, LeaveRecord, UserProfile};
}
