//! Foundation types for netdrift.
//!
//! This crate provides the device and snapshot types used throughout the
//! netdrift system. Every other netdrift crate depends on `netdrift-types`.
//!
//! # Key Types
//!
//! - [`Device`] — An inventory entry: name, host, platform
//! - [`Platform`] — The vendor OS family a device runs
//! - [`Snapshot`] — A captured blob of command output with its provenance
//! - [`TypeError`] — Validation errors for the above

pub mod device;
pub mod error;
pub mod snapshot;

pub use device::{validate_device_name, Device, Platform};
pub use error::TypeError;
pub use snapshot::Snapshot;
