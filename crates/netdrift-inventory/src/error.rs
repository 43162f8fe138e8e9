//! Error types for inventory operations.

/// Errors that can occur while loading or resolving the inventory.
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// Inventory file could not be read.
    #[error("inventory I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Inventory file is not valid TOML or has the wrong shape.
    #[error("inventory parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A declared device has an unusable name.
    #[error(transparent)]
    InvalidDevice(#[from] netdrift_types::TypeError),

    /// Two devices share the same name.
    #[error("duplicate device name: {0:?}")]
    DuplicateDevice(String),

    /// A group references a device that is not declared.
    #[error("group {group:?} references unknown device {device:?}")]
    UnknownGroupMember { group: String, device: String },

    /// A target string matched neither a device, a group, nor `all`.
    #[error("unknown target: {0:?}")]
    UnknownTarget(String),
}

/// Convenience alias for inventory results.
pub type InventoryResult<T> = Result<T, InventoryError>;
