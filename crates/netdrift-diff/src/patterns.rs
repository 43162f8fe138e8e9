//! Pattern tables driving canonicalization and identity extraction.
//!
//! The tables are ordered data, not dispatch: canonicalization applies the
//! substitutions strictly in sequence, and identity extraction tries the
//! recognizers strictly in sequence with first-match-wins. A [`PatternSet`]
//! is plain injected configuration; the engine holds no hidden globals.

use regex::{Captures, Regex};

/// Placeholder for timestamps.
pub const TIME_TOKEN: &str = "<TIME>";
/// Placeholder for uptimes and durations.
pub const UPTIME_TOKEN: &str = "<UPTIME>";
/// Placeholder for byte/packet/error counters.
pub const COUNTER_TOKEN: &str = "<COUNTER>";
/// Placeholder for session/sequence identifiers.
pub const ID_TOKEN: &str = "<ID>";

/// One identity recognizer: a header pattern plus a function that renders
/// the identity string from its captures.
pub struct Recognizer {
    pattern: Regex,
    build: fn(&Captures<'_>) -> String,
}

impl Recognizer {
    /// Create a recognizer from a compiled pattern and a builder function.
    pub fn new(pattern: Regex, build: fn(&Captures<'_>) -> String) -> Self {
        Self { pattern, build }
    }

    /// Apply this recognizer to a header line.
    pub fn recognize(&self, header: &str) -> Option<String> {
        self.pattern.captures(header).map(|caps| (self.build)(&caps))
    }
}

/// The full set of patterns used by the diff engine.
///
/// - `ignore`: lines matching any of these are pure noise and are dropped
///   outright during canonicalization.
/// - `substitutions`: applied in order; each rewrites volatile substrings to
///   a fixed placeholder token. Later entries never match inside placeholders
///   already inserted (placeholders contain no digits).
/// - `recognizers`: tried in order against block headers to derive an entity
///   identity; more specific recognizers come first.
pub struct PatternSet {
    ignore: Vec<Regex>,
    substitutions: Vec<(Regex, String)>,
    recognizers: Vec<Recognizer>,
}

impl PatternSet {
    /// Build a pattern set from explicit tables.
    pub fn new(
        ignore: Vec<Regex>,
        substitutions: Vec<(Regex, String)>,
        recognizers: Vec<Recognizer>,
    ) -> Self {
        Self {
            ignore,
            substitutions,
            recognizers,
        }
    }

    /// The built-in tables covering common vendor output.
    ///
    /// Substitution order is fixed: timestamps, then uptimes, then counters,
    /// then identifiers. Timestamp and compact-uptime tokens are matched as
    /// whitespace-delimited tokens so that hex pairs inside MAC addresses
    /// (`4d`, `00:11:22`) are never rewritten.
    pub fn builtin() -> Self {
        let ignore = vec![
            compile(r"(?i)^\s*(?:time\s+since|elapsed(?:\s+time)?|time\s+elapsed)\b"),
            compile(r"(?i)^\s*last\s+(?:flapped|updated|refreshed|clearing|input|output)\b"),
            compile(r"(?i)^\s*current\s+(?:date|time)\b"),
        ];

        let substitutions = vec![
            // Timestamps.
            sub(
                r"\b\d{4}-\d{2}-\d{2}[ T]\d{2}:\d{2}:\d{2}(?:\.\d+)?\b",
                TIME_TOKEN,
            ),
            sub(
                r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{1,2}\s+\d{2}:\d{2}:\d{2}\b",
                TIME_TOKEN,
            ),
            sub(
                r"(^|[\s(\[])\d{2}:\d{2}:\d{2}($|[\s,;)\]])",
                &format!("${{1}}{TIME_TOKEN}${{2}}"),
            ),
            // Uptimes and durations.
            sub(
                r"(?i)\b\d+\s*(?:years?|weeks?|days?|hours?|minutes?|seconds?)(?:\s*,?\s*\d+\s*(?:years?|weeks?|days?|hours?|minutes?|seconds?))*\b",
                UPTIME_TOKEN,
            ),
            sub(
                r"(^|\s)\d+[wdhms](?:\d+[wdhms])*($|[\s,;])",
                &format!("${{1}}{UPTIME_TOKEN}${{2}}"),
            ),
            // Counters.
            sub(
                r"(?i)\b((?:rx|tx)[-_]?(?:bytes?|packets?|errors?|drops?|bits?))(\s*[:=]?\s*)\d+",
                &format!("${{1}}${{2}}{COUNTER_TOKEN}"),
            ),
            sub(
                r"(?i)\b\d[\d,]*\s+(bytes?|bits?|packets?|octets?|frames?|errors?|drops?|collisions?)\b",
                &format!("{COUNTER_TOKEN} ${{1}}"),
            ),
            sub(r"\b\d{6,}\b", COUNTER_TOKEN),
            // Session and sequence identifiers.
            sub(
                r"(?i)\b((?:session|flow|conn(?:ection)?|peer)[-_ ]?id|seq(?:uence)?(?:[-_ ]?(?:no|num(?:ber)?))?)(\s*[:=#]?\s*)\d+",
                &format!("${{1}}${{2}}{ID_TOKEN}"),
            ),
            sub(r"\b0x[0-9A-Fa-f]{4,}\b", ID_TOKEN),
        ];

        let recognizers = vec![
            Recognizer::new(
                compile(r"(?i)^interface\s+([A-Za-z][A-Za-z-]*)(\d+(?:[/.:]\d+)*)"),
                build_interface,
            ),
            Recognizer::new(compile(r"(?i)^interface\s+(\S+)"), build_interface),
            Recognizer::new(
                compile(
                    r"^((?:(?:Gigabit|Fast|Ten|Forty|Hundred)?Ethernet)|Gi|Fa|Te|Fo|Hu|Serial|Se|Loopback|Lo|Tunnel|Tu|Vlan|Port-channel|Po|Bundle-Ether|ether|sfp|wlan|bridge)(\d+(?:[/.:]\d+)*)",
                ),
                build_interface,
            ),
            Recognizer::new(
                compile(r"(?i)^bgp\s+neighbor\s+(?:is\s+)?([0-9A-Fa-f:.]+)"),
                build_bgp_neighbor,
            ),
            Recognizer::new(
                compile(r"(?i)^neighbor\s+([0-9A-Fa-f:.]+)"),
                build_bgp_neighbor,
            ),
            Recognizer::new(
                compile(r"\b((?:\d{1,3}\.){3}\d{1,3})/(\d{1,2})\b"),
                build_route,
            ),
            Recognizer::new(
                compile(r"\b([0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5})\b"),
                build_mac,
            ),
            Recognizer::new(
                compile(r"\b([0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4}\.[0-9A-Fa-f]{4})\b"),
                build_mac,
            ),
        ];

        Self::new(ignore, substitutions, recognizers)
    }

    /// Returns `true` if the line matches any ignore pattern.
    pub fn is_ignored(&self, line: &str) -> bool {
        self.ignore.iter().any(|re| re.is_match(line))
    }

    /// The ordered substitution passes.
    pub fn substitutions(&self) -> &[(Regex, String)] {
        &self.substitutions
    }

    /// The ordered identity recognizers.
    pub fn recognizers(&self) -> &[Recognizer] {
        &self.recognizers
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("builtin pattern is valid")
}

fn sub(pattern: &str, replacement: &str) -> (Regex, String) {
    (compile(pattern), replacement.to_string())
}

fn build_interface(caps: &Captures<'_>) -> String {
    let kind = caps
        .get(1)
        .map(|m| m.as_str().trim_end_matches([',', ';', ':']))
        .unwrap_or("");
    let id = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    format!("Interface {kind}{id}")
}

fn build_bgp_neighbor(caps: &Captures<'_>) -> String {
    format!("BGP Neighbor {}", &caps[1])
}

fn build_route(caps: &Captures<'_>) -> String {
    format!("Route {}/{}", &caps[1], &caps[2])
}

fn build_mac(caps: &Captures<'_>) -> String {
    format!("MAC {}", &caps[1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_compiles() {
        let set = PatternSet::builtin();
        assert!(!set.substitutions().is_empty());
        assert!(!set.recognizers().is_empty());
    }

    #[test]
    fn ignore_matches_noise_lines() {
        let set = PatternSet::builtin();
        assert!(set.is_ignored("  Elapsed time: 00:02:11"));
        assert!(set.is_ignored("Last flapped   : 2d04h"));
        assert!(set.is_ignored("  current time: 12:00:00"));
        assert!(!set.is_ignored("  uptime: 1 week"));
        assert!(!set.is_ignored("  status: up"));
    }

    #[test]
    fn interface_recognizer_precedence() {
        let set = PatternSet::builtin();
        let hit = set.recognizers()[0].recognize("Interface ether1").unwrap();
        assert_eq!(hit, "Interface ether1");
    }

    #[test]
    fn bare_interface_names() {
        let set = PatternSet::builtin();
        let hits: Vec<_> = set
            .recognizers()
            .iter()
            .filter_map(|r| r.recognize("GigabitEthernet0/0/1 is up, line protocol is up"))
            .collect();
        assert_eq!(hits[0], "Interface GigabitEthernet0/0/1");
    }

    #[test]
    fn mac_recognizer_both_notations() {
        let set = PatternSet::builtin();
        let colon: Vec<_> = set
            .recognizers()
            .iter()
            .filter_map(|r| r.recognize("entry 00:1A:2B:3C:4D:5E dynamic"))
            .collect();
        assert_eq!(colon[0], "MAC 00:1A:2B:3C:4D:5E");

        let dotted: Vec<_> = set
            .recognizers()
            .iter()
            .filter_map(|r| r.recognize("entry 001a.2b3c.4d5e dynamic"))
            .collect();
        assert_eq!(dotted[0], "MAC 001a.2b3c.4d5e");
    }
}
