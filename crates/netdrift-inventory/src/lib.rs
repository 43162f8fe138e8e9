//! Device inventory and target resolution for netdrift.
//!
//! The inventory is a TOML file declaring devices and named groups:
//!
//! ```toml
//! [[devices]]
//! name = "edge-1"
//! host = "192.0.2.1"
//! platform = "routeros"
//!
//! [groups]
//! edge = ["edge-1", "edge-2"]
//! ```
//!
//! A target string resolves to devices: a device name, a group name, or
//! `all`. Device names take precedence over group names on collision.

pub mod error;
pub mod inventory;

pub use error::{InventoryError, InventoryResult};
pub use inventory::Inventory;
