//! Diff engine for netdrift.
//!
//! Compares two snapshots of unstructured show-command output and reports
//! operationally meaningful differences while suppressing churn from
//! counters, timestamps, and other volatile fields. No vendor grammar is
//! parsed; everything is driven by indentation structure and pattern tables.
//!
//! # Key Types
//!
//! - [`PatternSet`] -- Volatile-field substitutions and identity recognizers
//! - [`Block`] / [`segment`] -- Indentation-based block segmentation
//! - [`StateDiffer`] / [`StateDiff`] -- The heuristic state diff and its report
//! - [`ExactDiff`] / [`diff_exact`] -- Plain unified line diff for baseline files
//!
//! The heuristic pipeline: both texts are segmented into blocks, each block
//! gets a stable identity from its header line, each line is canonicalized
//! (volatile substrings become placeholder tokens), and the per-identity
//! canonical line sequences are aligned and classified by confidence.

pub mod canonical;
pub mod exact;
pub mod identity;
pub mod patterns;
pub mod segment;
pub mod state_diff;

pub use canonical::normalize;
pub use exact::{diff_exact, ExactDiff, Hunk, LineChange};
pub use identity::extract_identity;
pub use patterns::{PatternSet, Recognizer};
pub use segment::{segment, Block};
pub use state_diff::{diff_states, StateDiff, StateDiffer, SIMILARITY_THRESHOLD};
