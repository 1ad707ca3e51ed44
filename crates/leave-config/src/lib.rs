//! Leave Configuration Layer
//!
//! Settings for the annual leave tracker: where data lives, the allowance
//! rules, the first day of the week in calendar views and the date formats.
//!
//! Configuration is resolved in three layers:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file
//! 3. `LEAVE_*` environment variables
//!
//! # Example
//!
//! ```rust
//! use leave_config::{LeaveConfig, Validate};
//!
//! let config = LeaveConfig::from_toml(r#"
//!     database_name = "leave-tracker"
//!     default_allowance = 22
//! "#).unwrap();
//!
//! assert_eq!(config.default_allowance, 22);
//! assert!(config.is_valid());
//! ```
//!
//! # Environment
//!
//! - `LEAVE_APP_ID`, `LEAVE_CLUSTER_NAME`, `LEAVE_DATABASE_NAME`,
//!   `LEAVE_COLLECTION_NAME`: data source identifiers
//! - `LEAVE_STORAGE_PATH`: local database file
//! - `LEAVE_DEFAULT_ALLOWANCE`: allowance for users without one
//! - `LEAVE_WEEK_START`: `monday` or `sunday`

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod config;
mod error;

// Re-export core types
pub use config::{
    LeaveConfig, ENV_APP_ID, ENV_CLUSTER_NAME, ENV_COLLECTION_NAME, ENV_DATABASE_NAME,
    ENV_DEFAULT_ALLOWANCE, ENV_STORAGE_PATH, ENV_WEEK_START,
};
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::LeaveConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate};
}
