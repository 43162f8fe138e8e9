//! Entity identity extraction from block headers.

use crate::patterns::PatternSet;
use crate::segment::Block;

/// Derive a stable identity for a block from its header line.
///
/// The recognizers in the pattern set are tried in order, first match wins;
/// the body of the block is never consulted. When no recognizer matches, a
/// generic heuristic applies: if the header's second whitespace token is
/// purely numeric, the identity is the first two tokens (captures "VLAN 10",
/// "peer 5"). Returns `None` when nothing matches; the differ then falls
/// back to the canonicalized header.
pub fn extract_identity(block: &Block, patterns: &PatternSet) -> Option<String> {
    let header = block.header();

    for recognizer in patterns.recognizers() {
        if let Some(identity) = recognizer.recognize(header) {
            return Some(identity);
        }
    }

    let mut tokens = header.split_whitespace();
    if let (Some(first), Some(second)) = (tokens.next(), tokens.next()) {
        if second.chars().all(|c| c.is_ascii_digit()) {
            return Some(format!("{first} {second}"));
        }
    }

    None
}
