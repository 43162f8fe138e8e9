//! Heuristic state diff: entity-level comparison of two output snapshots.
//!
//! Both texts are segmented into blocks, each block becomes an entity keyed
//! by a stable identity, and the canonical line sequences of entities present
//! on both sides are aligned with Myers diff. Changes are classified by
//! string similarity into high-confidence (likely operational) and
//! low-confidence (likely cosmetic) lists.

use std::collections::HashMap;

use serde::Serialize;
use similar::{capture_diff_slices, Algorithm, DiffOp, TextDiff};

use crate::canonical::normalize;
use crate::identity::extract_identity;
use crate::patterns::PatternSet;
use crate::segment::segment;

/// Replaced line pairs with a similarity ratio strictly above this are
/// classified as low confidence; at or below it they are high confidence.
pub const SIMILARITY_THRESHOLD: f32 = 0.8;

/// Below this many dropped noise lines, the ignored list itemizes them;
/// from this count on it collapses to a single summary entry.
const IGNORED_ITEMIZE_LIMIT: usize = 10;

const NO_CHANGES: &str = "No significant changes detected.";

/// The result of a heuristic state diff: three ordered lists of formatted
/// change strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StateDiff {
    /// Likely operational changes: added/removed entities, added/removed
    /// lines, and dissimilar line replacements.
    pub high_confidence: Vec<String>,
    /// Likely cosmetic churn: near-identical line replacements.
    pub low_confidence: Vec<String>,
    /// Lines dropped as pure noise, itemized or summarized by count.
    pub ignored: Vec<String>,
}

impl StateDiff {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no change of any confidence was found.
    pub fn has_changes(&self) -> bool {
        !self.high_confidence.is_empty() || !self.low_confidence.is_empty()
    }

    /// Render the report as a multi-line summary, or a fixed no-changes
    /// message when all three lists are empty.
    pub fn summary(&self) -> String {
        let sections = [
            ("High confidence changes:", &self.high_confidence),
            ("Low confidence changes:", &self.low_confidence),
            ("Ignored (volatile):", &self.ignored),
        ];

        if sections.iter().all(|(_, lines)| lines.is_empty()) {
            return NO_CHANGES.to_string();
        }

        let mut out = String::new();
        for (title, lines) in sections {
            if lines.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(title);
            out.push('\n');
            for line in lines {
                out.push_str("  ");
                out.push_str(line);
                out.push('\n');
            }
        }
        out
    }
}

/// The heuristic state differ. Holds only the pattern tables; all counters
/// and maps are local to a single [`diff`](StateDiffer::diff) call, so one
/// differ can serve many threads without locking.
pub struct StateDiffer {
    patterns: PatternSet,
}

impl StateDiffer {
    /// Create a differ with an injected pattern set.
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// Compare two output snapshots.
    ///
    /// Never fails: empty or malformed input degrades to an empty entity map
    /// and an empty report.
    pub fn diff(&self, old_text: &str, new_text: &str) -> StateDiff {
        let mut dropped = Vec::new();
        let old = build_entities(old_text, &self.patterns, &mut dropped);
        let new = build_entities(new_text, &self.patterns, &mut dropped);

        let mut report = StateDiff::new();

        for identity in &new.order {
            if !old.lines.contains_key(identity) {
                report.high_confidence.push(format!("[+] Added: {identity}"));
            }
        }
        for identity in &old.order {
            if !new.lines.contains_key(identity) {
                report
                    .high_confidence
                    .push(format!("[-] Removed: {identity}"));
            }
        }

        for identity in &old.order {
            let old_lines = &old.lines[identity];
            let Some(new_lines) = new.lines.get(identity) else {
                continue;
            };
            if old_lines == new_lines {
                continue;
            }
            diff_entity(identity, old_lines, new_lines, &mut report);
        }

        if dropped.len() < IGNORED_ITEMIZE_LIMIT {
            report.ignored.extend(dropped);
        } else {
            report
                .ignored
                .push(format!("{} volatile lines suppressed", dropped.len()));
        }

        report
    }
}

impl Default for StateDiffer {
    fn default() -> Self {
        Self::new(PatternSet::builtin())
    }
}

/// Compare two snapshots with the built-in pattern tables.
pub fn diff_states(old_text: &str, new_text: &str) -> StateDiff {
    StateDiffer::default().diff(old_text, new_text)
}

/// One side's entities: identity to canonical line sequence, in input order.
struct EntityMap {
    order: Vec<String>,
    lines: HashMap<String, Vec<String>>,
}

fn build_entities(text: &str, patterns: &PatternSet, dropped: &mut Vec<String>) -> EntityMap {
    let mut map = EntityMap {
        order: Vec::new(),
        lines: HashMap::new(),
    };
    let mut unknown_counter = 0usize;

    for block in segment(text) {
        let mut canonical = Vec::with_capacity(block.lines().len());
        for line in block.lines() {
            let normalized = normalize(line, patterns);
            if normalized.is_empty() {
                dropped.push(line.trim().to_string());
            } else {
                canonical.push(normalized);
            }
        }
        // A block whose every line is noise produces no entity at all.
        if canonical.is_empty() {
            continue;
        }

        let identity = match extract_identity(&block, patterns) {
            Some(identity) => identity,
            None => normalize(block.header(), patterns),
        };
        let identity = if identity.is_empty() {
            unknown_counter += 1;
            format!("Unknown Block {unknown_counter}")
        } else {
            identity
        };
        let identity = disambiguate(identity, &map.lines);

        map.order.push(identity.clone());
        map.lines.insert(identity, canonical);
    }

    map
}

/// Keep identities unique within one side by suffixing a counter.
fn disambiguate(identity: String, used: &HashMap<String, Vec<String>>) -> String {
    if !used.contains_key(&identity) {
        return identity;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{identity} ({n})");
        if !used.contains_key(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Align two canonical line sequences and classify the differences.
fn diff_entity(identity: &str, old: &[String], new: &[String], report: &mut StateDiff) {
    for op in capture_diff_slices(Algorithm::Myers, old, new) {
        match op {
            DiffOp::Equal { .. } => {}
            DiffOp::Delete {
                old_index, old_len, ..
            } => {
                for line in &old[old_index..old_index + old_len] {
                    report.high_confidence.push(format!("[-] {identity}: {line}"));
                }
            }
            DiffOp::Insert {
                new_index, new_len, ..
            } => {
                for line in &new[new_index..new_index + new_len] {
                    report.high_confidence.push(format!("[+] {identity}: {line}"));
                }
            }
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                let paired = old_len.min(new_len);
                for i in 0..paired {
                    let before = &old[old_index + i];
                    let after = &new[new_index + i];
                    let entry = format!("~ {identity}: {before} -> {after}");
                    let ratio = TextDiff::from_chars(before.as_str(), after.as_str()).ratio();
                    if ratio > SIMILARITY_THRESHOLD {
                        report.low_confidence.push(entry);
                    } else {
                        report.high_confidence.push(entry);
                    }
                }
                // Unpaired leftovers behave like plain deletes/inserts.
                for line in &old[old_index + paired..old_index + old_len] {
                    report.high_confidence.push(format!("[-] {identity}: {line}"));
                }
                for line in &new[new_index + paired..new_index + new_len] {
                    report.high_confidence.push(format!("[+] {identity}: {line}"));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use proptest::prelude::*;

    use super::*;

    #[test]
    fn identical_text_is_quiet() {
        let text = "Interface ether1\n  status: up\n  rx-byte: 1000\n";
        let report = diff_states(text, text);
        assert!(report.high_confidence.is_empty());
        assert!(report.low_confidence.is_empty());
    }

    #[test]
    fn empty_inputs_yield_empty_report() {
        let report = diff_states("", "");
        assert!(!report.has_changes());
        assert_eq!(report.summary(), "No significant changes detected.");
    }

    #[test]
    fn status_change_is_high_confidence_and_counters_suppressed() {
        let old = "Interface ether1\n  status: up\n  rx-byte: 1000";
        let new = "Interface ether1\n  status: down\n  rx-byte: 5000";
        let report = diff_states(old, new);

        assert!(report
            .high_confidence
            .contains(&"~ Interface ether1: status: up -> status: down".to_string()));
        let mentions_counter = |lines: &[String]| lines.iter().any(|l| l.contains("rx-byte"));
        assert!(!mentions_counter(&report.high_confidence));
        assert!(!mentions_counter(&report.low_confidence));
    }

    #[test]
    fn extra_block_reported_as_added() {
        let old = "Interface ether1\n  status: up";
        let new = "Interface ether1\n  status: up\nInterface ether2\n  status: up";
        let report = diff_states(old, new);
        assert!(report
            .high_confidence
            .contains(&"[+] Added: Interface ether2".to_string()));
    }

    #[test]
    fn missing_block_reported_as_removed() {
        let old = "Interface ether1\n  status: up\nInterface ether2\n  status: up";
        let new = "Interface ether1\n  status: up";
        let report = diff_states(old, new);
        assert!(report
            .high_confidence
            .contains(&"[-] Removed: Interface ether2".to_string()));
    }

    #[test]
    fn uptime_change_produces_no_diff() {
        let old = "Interface ether1\n  uptime: 1 week";
        let new = "Interface ether1\n  uptime: 2 weeks";
        let report = diff_states(old, new);
        assert!(report.high_confidence.is_empty());
        assert!(report.low_confidence.is_empty());
    }

    #[test]
    fn near_identical_change_is_low_confidence() {
        let old = "Custom Widget A\n  color: deep blue";
        let new = "Custom Widget A\n  color: deep blues";
        let report = diff_states(old, new);
        assert!(report.high_confidence.is_empty());
        assert_eq!(
            report.low_confidence,
            vec!["~ Custom Widget A: color: deep blue -> color: deep blues".to_string()]
        );
    }

    #[test]
    fn similarity_ratio_exactly_at_threshold_is_high_confidence() {
        // "abcde" vs "abcdX": 4 matching chars over 10 total, ratio exactly
        // 0.8, which is not strictly above the threshold.
        let old = "Widget 1\n  abcde";
        let new = "Widget 1\n  abcdX";
        let report = diff_states(old, new);
        assert!(report.low_confidence.is_empty());
        assert!(report
            .high_confidence
            .contains(&"~ Widget 1: abcde -> abcdX".to_string()));
    }

    #[test]
    fn similarity_ratio_just_above_threshold_is_low_confidence() {
        // 9 matching chars over 20 total: ratio 0.9.
        let old = "Widget 1\n  abcdefghij";
        let new = "Widget 1\n  abcdefghiX";
        let report = diff_states(old, new);
        assert!(report.high_confidence.is_empty());
        assert_eq!(report.low_confidence.len(), 1);
    }

    #[test]
    fn added_line_within_entity() {
        let old = "Interface ether1\n  status: up";
        let new = "Interface ether1\n  status: up\n  mtu 1500";
        let report = diff_states(old, new);
        assert!(report
            .high_confidence
            .contains(&"[+] Interface ether1: mtu 1500".to_string()));
    }

    #[test]
    fn removed_line_within_entity() {
        let old = "Interface ether1\n  status: up\n  mtu 1500";
        let new = "Interface ether1\n  status: up";
        let report = diff_states(old, new);
        assert!(report
            .high_confidence
            .contains(&"[-] Interface ether1: mtu 1500".to_string()));
    }

    #[test]
    fn duplicate_headers_are_disambiguated() {
        let text = "port 1\n  speed 10\nport 1\n  speed 25\n";
        let report = diff_states(text, "");
        let removed: BTreeSet<_> = report
            .high_confidence
            .iter()
            .filter_map(|l| l.strip_prefix("[-] Removed: "))
            .collect();
        assert_eq!(removed, BTreeSet::from(["port 1", "port 1 (2)"]));
    }

    #[test]
    fn headerless_blocks_get_unknown_identities() {
        // The header is an ignored noise line, so it canonicalizes to nothing
        // usable while the children keep the block alive.
        let old = "Elapsed time: 00:00:01\n  payload old\n";
        let new = "Elapsed time: 00:00:09\n  payload completely different\n";
        let report = diff_states(old, new);
        assert!(report
            .high_confidence
            .iter()
            .any(|l| l.contains("Unknown Block 1")));
    }

    #[test]
    fn all_noise_block_is_discarded_entirely() {
        let old = "Elapsed time: 00:00:01\n  Last updated: 12:00:00\n";
        let report = diff_states(old, "");
        assert!(report.high_confidence.is_empty());
        assert!(report.low_confidence.is_empty());
        // The dropped lines still show up as ignored noise.
        assert_eq!(report.ignored.len(), 2);
    }

    #[test]
    fn ignored_lines_summarized_when_many() {
        let noisy: String = (0..6)
            .map(|i| format!("block{i}\n  Elapsed time: 00:00:0{i}\n  Last updated: now\n"))
            .collect();
        let report = diff_states(&noisy, &noisy);
        // 12 drops per side, 24 total: summarized as a count.
        assert_eq!(report.ignored.len(), 1);
        assert_eq!(report.ignored[0], "24 volatile lines suppressed");
    }

    #[test]
    fn summary_lists_sections_in_order() {
        let old = "Interface ether1\n  status: up";
        let new = "Interface ether1\n  status: down\nInterface ether2\n  status: up";
        let summary = diff_states(old, new).summary();
        assert!(summary.starts_with("High confidence changes:"));
        assert!(summary.contains("[+] Added: Interface ether2"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = diff_states("a\n  x", "a\n  completely different line here");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("high_confidence"));
    }

    fn line_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("Interface ether1".to_string()),
            Just("Interface ether2".to_string()),
            Just("  status: up".to_string()),
            Just("  status: down".to_string()),
            Just("  rx-byte: 123456".to_string()),
            Just("Elapsed time: 00:00:01".to_string()),
            // Lowercase so random headers can never collide with the
            // "Added:"/"Removed:" identity prefixes.
            "[b-z][a-z ]{0,15}",
            "  [a-z ]{0,15}",
        ]
    }

    fn text_strategy() -> impl Strategy<Value = String> {
        proptest::collection::vec(line_strategy(), 0..16).prop_map(|lines| lines.join("\n"))
    }

    proptest! {
        #[test]
        fn diff_against_self_is_quiet(text in text_strategy()) {
            let report = diff_states(&text, &text);
            prop_assert!(report.high_confidence.is_empty());
            prop_assert!(report.low_confidence.is_empty());
        }

        #[test]
        fn added_removed_symmetry(a in text_strategy(), b in text_strategy()) {
            let forward = diff_states(&a, &b);
            let backward = diff_states(&b, &a);
            let added: BTreeSet<_> = forward
                .high_confidence
                .iter()
                .filter_map(|l| l.strip_prefix("[+] Added: "))
                .collect();
            let removed: BTreeSet<_> = backward
                .high_confidence
                .iter()
                .filter_map(|l| l.strip_prefix("[-] Removed: "))
                .collect();
            prop_assert_eq!(added, removed);
        }
    }
}
