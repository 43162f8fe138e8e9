//! Indentation-based block segmentation.
//!
//! A block is one header line (no leading whitespace) plus its indented
//! continuation lines. This is a pure heuristic: indentation depth is not
//! compared, so nested structures collapse into one flat block per header.
//! Changing that would change entity identities, so the flat behavior is
//! kept deliberately.

/// An ordered, non-empty sequence of raw lines. Line 0 is the header.
///
/// Non-emptiness is enforced by construction, so [`header`](Block::header)
/// cannot panic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    /// Create a block from its raw lines. Returns `None` for an empty
    /// sequence; a block always has a header.
    pub fn new(lines: Vec<String>) -> Option<Self> {
        if lines.is_empty() {
            None
        } else {
            Some(Self { lines })
        }
    }

    /// The raw lines, trailing whitespace stripped.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The header line.
    pub fn header(&self) -> &str {
        &self.lines[0]
    }

    /// The indented continuation lines.
    pub fn children(&self) -> &[String] {
        &self.lines[1..]
    }
}

/// Split raw text into blocks.
///
/// Blank lines are discarded. A line with no leading whitespace closes the
/// current block and opens a new one; an indented line is appended to the
/// open block. An indented line arriving before any header becomes a
/// degenerate single-line block.
pub fn segment(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim_end();
        if line.trim().is_empty() {
            continue;
        }

        let indented = line.starts_with(' ') || line.starts_with('\t');
        if !indented {
            if !current.is_empty() {
                blocks.push(Block {
                    lines: std::mem::take(&mut current),
                });
            }
            current.push(line.to_string());
        } else if current.is_empty() {
            blocks.push(Block {
                lines: vec![line.to_string()],
            });
        } else {
            current.push(line.to_string());
        }
    }

    if !current.is_empty() {
        blocks.push(Block { lines: current });
    }

    blocks
}
