//! Device and platform types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The vendor OS family a device runs.
///
/// netdrift never parses vendor output into a typed model; the platform is
/// carried only as provenance and for choosing default show commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// MikroTik RouterOS.
    RouterOs,
    /// Cisco IOS / IOS-XE.
    Ios,
    /// Juniper Junos.
    Junos,
    /// Anything else; treated the same by the diff engine.
    #[default]
    Generic,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::RouterOs => "routeros",
            Platform::Ios => "ios",
            Platform::Junos => "junos",
            Platform::Generic => "generic",
        };
        f.write_str(name)
    }
}

impl FromStr for Platform {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "routeros" => Ok(Platform::RouterOs),
            "ios" => Ok(Platform::Ios),
            "junos" => Ok(Platform::Junos),
            "generic" => Ok(Platform::Generic),
            other => Err(TypeError::UnknownPlatform(other.to_string())),
        }
    }
}

/// A device as declared in the inventory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Unique inventory name, e.g. `edge-1`.
    pub name: String,
    /// Hostname or address used to reach the device.
    pub host: String,
    /// OS family.
    #[serde(default)]
    pub platform: Platform,
}

impl Device {
    /// Create a device after validating its name.
    ///
    /// Names are restricted to alphanumerics, `-`, `_`, and `.` so they can
    /// double as baseline file name components.
    pub fn new(name: &str, host: &str, platform: Platform) -> Result<Self, TypeError> {
        validate_device_name(name)?;
        Ok(Self {
            name: name.to_string(),
            host: host.to_string(),
            platform,
        })
    }
}

/// Check that a device name is non-empty and file-name safe.
pub fn validate_device_name(name: &str) -> Result<(), TypeError> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if ok {
        Ok(())
    } else {
        Err(TypeError::InvalidDeviceName(name.to_string()))
    }
}
