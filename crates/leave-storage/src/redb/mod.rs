//! On-disk backend.
//!
//! [`RedbStorage`] keeps leave records and user profiles in a single
//! [redb](https://crates.io/crates/redb) file.

mod storage;

pub use storage::RedbStorage;
