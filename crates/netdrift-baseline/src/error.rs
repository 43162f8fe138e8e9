//! Error types for baseline storage.

/// Errors that can occur while saving or loading baselines.
#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    /// No baseline stored for the given device and command.
    #[error("no baseline for device {device:?}, command {command:?}")]
    NotFound { device: String, command: String },

    /// The device name is not usable as a file name component.
    #[error(transparent)]
    InvalidDevice(#[from] netdrift_types::TypeError),

    /// Filesystem operation failed.
    #[error("baseline I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored baseline file could not be encoded or decoded.
    #[error("baseline serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for baseline results.
pub type BaselineResult<T> = Result<T, BaselineError>;
