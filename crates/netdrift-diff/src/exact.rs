//! Exact diff: plain unified line comparison for baseline files.
//!
//! No canonicalization is applied here; this is the literal byte-for-byte
//! mode used when the comparison subject is a stored baseline file. Uses
//! Myers diff with three lines of context per hunk.

use serde::Serialize;
use similar::{ChangeTag, TextDiff};

const CONTEXT_LINES: usize = 3;

/// The result of an exact line diff between two texts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExactDiff {
    /// The diff hunks.
    pub hunks: Vec<Hunk>,
    /// Total number of lines in the old text.
    pub old_lines: usize,
    /// Total number of lines in the new text.
    pub new_lines: usize,
}

impl ExactDiff {
    /// Returns `true` if the two texts are identical.
    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }

    /// Total number of lines added across all hunks.
    pub fn additions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.changes)
            .filter(|c| matches!(c, LineChange::Added(_)))
            .count()
    }

    /// Total number of lines removed across all hunks.
    pub fn deletions(&self) -> usize {
        self.hunks
            .iter()
            .flat_map(|h| &h.changes)
            .filter(|c| matches!(c, LineChange::Removed(_)))
            .count()
    }

    /// Render the diff in unified format with `@@` hunk headers.
    pub fn unified(&self) -> String {
        let mut out = String::new();
        for hunk in &self.hunks {
            out.push_str(&format!(
                "@@ -{},{} +{},{} @@\n",
                hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
            ));
            for change in &hunk.changes {
                let (sign, text) = match change {
                    LineChange::Context(line) => (' ', line),
                    LineChange::Added(line) => ('+', line),
                    LineChange::Removed(line) => ('-', line),
                };
                out.push(sign);
                out.push_str(text);
                out.push('\n');
            }
        }
        out
    }
}

/// A contiguous region of changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Hunk {
    /// Line number in the old text where this hunk starts (1-based).
    pub old_start: usize,
    /// Number of old-text lines in this hunk.
    pub old_count: usize,
    /// Line number in the new text where this hunk starts (1-based).
    pub new_start: usize,
    /// Number of new-text lines in this hunk.
    pub new_count: usize,
    /// The individual line changes.
    pub changes: Vec<LineChange>,
}

/// A single line in a hunk.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum LineChange {
    /// Present in both texts.
    Context(String),
    /// Added in the new text.
    Added(String),
    /// Removed from the old text.
    Removed(String),
}

/// Compute an exact unified line diff between two texts.
pub fn diff_exact(old: &str, new: &str) -> ExactDiff {
    let old_lines = old.lines().count();
    let new_lines = new.lines().count();

    if old == new {
        return ExactDiff {
            hunks: Vec::new(),
            old_lines,
            new_lines,
        };
    }

    let text_diff = TextDiff::from_lines(old, new);
    let mut hunks = Vec::new();

    for group in text_diff.grouped_ops(CONTEXT_LINES) {
        let mut changes = Vec::new();
        let mut old_start = 0usize;
        let mut new_start = 0usize;
        let mut old_count = 0usize;
        let mut new_count = 0usize;
        let mut first = true;

        for op in &group {
            if first {
                old_start = op.old_range().start + 1;
                new_start = op.new_range().start + 1;
                first = false;
            }

            for change in text_diff.iter_changes(op) {
                let text = change.value().trim_end_matches('\n').to_string();
                match change.tag() {
                    ChangeTag::Equal => {
                        changes.push(LineChange::Context(text));
                        old_count += 1;
                        new_count += 1;
                    }
                    ChangeTag::Delete => {
                        changes.push(LineChange::Removed(text));
                        old_count += 1;
                    }
                    ChangeTag::Insert => {
                        changes.push(LineChange::Added(text));
                        new_count += 1;
                    }
                }
            }
        }

        hunks.push(Hunk {
            old_start,
            old_count,
            new_start,
            new_count,
            changes,
        });
    }

    ExactDiff {
        hunks,
        old_lines,
        new_lines,
    }
}
