//! Captured command output with its provenance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One captured blob of show-command output.
///
/// The text is already decoded; acquisition (session execution, file read)
/// happens before a `Snapshot` exists. Trailing whitespace in the text is
/// preserved here and handled by the diff engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Inventory name of the device the output came from.
    pub device: String,
    /// The command that produced the output, verbatim.
    pub command: String,
    /// When the output was captured.
    pub captured_at: DateTime<Utc>,
    /// The raw output text.
    pub text: String,
}

impl Snapshot {
    /// Create a snapshot captured now.
    pub fn new(device: &str, command: &str, text: &str) -> Self {
        Self {
            device: device.to_string(),
            command: command.to_string(),
            captured_at: Utc::now(),
            text: text.to_string(),
        }
    }

    /// Returns `true` if the captured text contains no non-blank lines.
    pub fn is_blank(&self) -> bool {
        self.text.lines().all(|l| l.trim().is_empty())
    }
}
