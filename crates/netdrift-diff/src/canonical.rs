//! Line canonicalization: rewrite volatile substrings to placeholder tokens.

use crate::patterns::PatternSet;

/// Canonicalize a single raw line.
///
/// Returns the empty string when the line matches an ignore pattern, which
/// signals the caller to drop it. Otherwise applies every substitution pass
/// in table order and trims the result. A line made entirely of volatile
/// content collapses to placeholder tokens but is still retained; only the
/// ignore path drops a line outright.
///
/// Pure function of the line and the pattern set.
pub fn normalize(line: &str, patterns: &PatternSet) -> String {
    if patterns.is_ignored(line) {
        return String::new();
    }

    let mut text = line.to_string();
    for (pattern, replacement) in patterns.substitutions() {
        text = pattern.replace_all(&text, replacement.as_str()).into_owned();
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(line: &str) -> String {
        normalize(line, &PatternSet::builtin())
    }

    #[test]
    fn plain_line_is_trimmed_only() {
        assert_eq!(canon("  status: up  "), "status: up");
    }

    #[test]
    fn ignored_line_becomes_empty() {
        assert_eq!(canon("Elapsed time: 00:11:22"), "");
    }

    #[test]
    fn iso_timestamp_replaced() {
        assert_eq!(
            canon("last boot 2026-08-29 07:15:02 reason power"),
            "last boot <TIME> reason power"
        );
    }

    #[test]
    fn syslog_timestamp_replaced() {
        assert_eq!(canon("logged Aug 29 07:15:02 link up"), "logged <TIME> link up");
    }

    #[test]
    fn bare_clock_token_replaced() {
        assert_eq!(canon("at 12:33:44, link reset"), "at <TIME>, link reset");
    }

    #[test]
    fn uptime_word_form() {
        assert_eq!(canon("uptime: 1 week"), "uptime: <UPTIME>");
        assert_eq!(canon("uptime: 2 weeks"), "uptime: <UPTIME>");
        assert_eq!(canon("up 5 days, 3 hours"), "up <UPTIME>");
    }

    #[test]
    fn uptime_compact_form() {
        assert_eq!(canon("uptime is 1w2d3h"), "uptime is <UPTIME>");
    }

    #[test]
    fn named_counter_replaced() {
        assert_eq!(canon("  rx-byte: 1000"), "rx-byte: <COUNTER>");
        assert_eq!(canon("  rx-byte: 5000"), "rx-byte: <COUNTER>");
        assert_eq!(canon("tx_packets=42"), "tx_packets=<COUNTER>");
    }

    #[test]
    fn unit_counter_replaced() {
        assert_eq!(canon("in 1,234 bytes out"), "in <COUNTER> bytes out");
    }

    #[test]
    fn large_bare_number_replaced() {
        assert_eq!(canon("total 123456789"), "total <COUNTER>");
        // Small numbers are meaningful (VLAN ids, ports) and survive.
        assert_eq!(canon("vlan 100"), "vlan 100");
    }

    #[test]
    fn session_id_replaced() {
        assert_eq!(canon("session-id: 4711"), "session-id: <ID>");
        assert_eq!(canon("sequence number 991"), "sequence number <ID>");
        assert_eq!(canon("cookie 0xDEADBEEF"), "cookie <ID>");
    }

    #[test]
    fn mac_addresses_survive_canonicalization() {
        assert_eq!(
            canon("  dynamic 00:1a:2b:3c:4d:5e on ether1"),
            "dynamic 00:1a:2b:3c:4d:5e on ether1"
        );
    }

    #[test]
    fn fully_volatile_line_keeps_placeholder() {
        // Not dropped: only ignore patterns drop lines.
        assert_eq!(canon("  1234567"), "<COUNTER>");
    }
}
