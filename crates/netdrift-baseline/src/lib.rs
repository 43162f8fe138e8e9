//! Baseline snapshot storage for netdrift.
//!
//! A baseline is a [`Snapshot`](netdrift_types::Snapshot) persisted as a JSON
//! file under a root directory, keyed by device name and a sanitized form of
//! the command. Later captures are diffed against it to detect drift.
//!
//! # Modules
//!
//! - [`error`] — Error types for baseline operations
//! - [`store`] — The directory-backed [`BaselineStore`]

pub mod error;
pub mod store;

pub use error::{BaselineError, BaselineResult};
pub use store::{sanitize_command, BaselineEntry, BaselineStore};
