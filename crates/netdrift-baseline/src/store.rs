//! Directory-backed baseline storage.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use netdrift_types::{validate_device_name, Snapshot};

use crate::error::{BaselineError, BaselineResult};

/// Stores one JSON file per (device, command) pair under a root directory.
///
/// File names are `{device}__{sanitized-command}.json`. Saving overwrites
/// any previous baseline for the same pair.
pub struct BaselineStore {
    root: PathBuf,
}

/// One stored baseline, as reported by [`BaselineStore::list`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaselineEntry {
    pub device: String,
    pub command: String,
    pub captured_at: DateTime<Utc>,
    pub path: PathBuf,
}

impl BaselineStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist a snapshot as the baseline for its (device, command) pair.
    ///
    /// The device name must pass [`validate_device_name`]: it becomes a file
    /// name component, so path separators and the like are rejected here.
    pub fn save(&self, snapshot: &Snapshot) -> BaselineResult<PathBuf> {
        validate_device_name(&snapshot.device)?;
        fs::create_dir_all(&self.root)?;
        let path = self.path_for(&snapshot.device, &snapshot.command);
        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&path, json)?;
        Ok(path)
    }

    /// Load the baseline for a (device, command) pair.
    pub fn load(&self, device: &str, command: &str) -> BaselineResult<Snapshot> {
        validate_device_name(device)?;
        let path = self.path_for(device, command);
        let data = match fs::read_to_string(&path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(BaselineError::NotFound {
                    device: device.to_string(),
                    command: command.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&data)?)
    }

    /// List all stored baselines, sorted by file name.
    ///
    /// A missing root directory is an empty store, not an error.
    pub fn list(&self) -> BaselineResult<Vec<BaselineEntry>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut paths: Vec<PathBuf> = entries
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut baselines = Vec::with_capacity(paths.len());
        for path in paths {
            let data = fs::read_to_string(&path)?;
            let snapshot: Snapshot = serde_json::from_str(&data)?;
            baselines.push(BaselineEntry {
                device: snapshot.device,
                command: snapshot.command,
                captured_at: snapshot.captured_at,
                path,
            });
        }
        Ok(baselines)
    }

    fn path_for(&self, device: &str, command: &str) -> PathBuf {
        self.root
            .join(format!("{}__{}.json", device, sanitize_command(command)))
    }
}

/// Map a command string to a file-name-safe form: runs of characters outside
/// `[A-Za-z0-9.-]` collapse to a single `-`, with leading and trailing `-`
/// trimmed.
pub fn sanitize_command(command: &str) -> String {
    let mut out = String::with_capacity(command.len());
    let mut pending_dash = false;
    for c in command.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c);
        } else {
            pending_dash = true;
        }
    }
    out
}
