use thiserror::Error;

/// Errors produced by type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid device name: {0:?}")]
    InvalidDeviceName(String),

    #[error("unknown platform: {0:?}")]
    UnknownPlatform(String),
}
