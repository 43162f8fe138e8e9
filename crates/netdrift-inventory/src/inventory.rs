//! Inventory loading and target resolution.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use netdrift_types::{validate_device_name, Device};
use serde::Deserialize;

use crate::error::{InventoryError, InventoryResult};

/// Raw on-disk shape of the inventory file.
#[derive(Debug, Default, Deserialize)]
struct InventoryFile {
    #[serde(default)]
    devices: Vec<Device>,
    #[serde(default)]
    groups: BTreeMap<String, Vec<String>>,
}

/// A validated device inventory.
pub struct Inventory {
    devices: Vec<Device>,
    by_name: HashMap<String, usize>,
    groups: BTreeMap<String, Vec<String>>,
}

impl Inventory {
    /// Load and validate an inventory from a TOML file.
    pub fn load(path: &Path) -> InventoryResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Parse and validate an inventory from TOML text.
    ///
    /// Invalid or duplicate device names and group members that reference
    /// undeclared devices are rejected here, not at resolution time.
    pub fn parse(text: &str) -> InventoryResult<Self> {
        let file: InventoryFile = toml::from_str(text)?;

        let mut by_name = HashMap::with_capacity(file.devices.len());
        for (index, device) in file.devices.iter().enumerate() {
            validate_device_name(&device.name)?;
            if by_name.insert(device.name.clone(), index).is_some() {
                return Err(InventoryError::DuplicateDevice(device.name.clone()));
            }
        }

        for (group, members) in &file.groups {
            for member in members {
                if !by_name.contains_key(member) {
                    return Err(InventoryError::UnknownGroupMember {
                        group: group.clone(),
                        device: member.clone(),
                    });
                }
            }
        }

        Ok(Self {
            devices: file.devices,
            by_name,
            groups: file.groups,
        })
    }

    /// All declared devices, in file order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Look up a single device by name.
    pub fn get(&self, name: &str) -> Option<&Device> {
        self.by_name.get(name).map(|&i| &self.devices[i])
    }

    /// Resolve a target string to devices.
    ///
    /// `all` resolves to every device. A device name wins over a group of
    /// the same name.
    pub fn resolve(&self, target: &str) -> InventoryResult<Vec<&Device>> {
        if target == "all" {
            return Ok(self.devices.iter().collect());
        }
        if let Some(device) = self.get(target) {
            return Ok(vec![device]);
        }
        if let Some(members) = self.groups.get(target) {
            // Members were validated at load time.
            return Ok(members
                .iter()
                .filter_map(|name| self.get(name))
                .collect());
        }
        Err(InventoryError::UnknownTarget(target.to_string()))
    }
}
