//! Dialect detection from version banners and syntax fingerprints.

use super::Dialect;

/// One detection rule. Rules are evaluated in order; the first match wins.
struct DetectionRule {
    dialect: Dialect,
    matches: fn(&str) -> bool,
}

const RULES: &[DetectionRule] = &[
    DetectionRule {
        dialect: Dialect::ArubaCx,
        matches: aruba_version_banner,
    },
    DetectionRule {
        dialect: Dialect::CiscoIos,
        matches: cisco_version_banner,
    },
    DetectionRule {
        dialect: Dialect::CiscoIos,
        matches: cisco_syntax,
    },
];

fn aruba_version_banner(text: &str) -> bool {
    text.contains("Version AOS-CX")
}

fn cisco_version_banner(text: &str) -> bool {
    text.contains("version ") && (text.contains("IOS XE") || text.contains("Cisco"))
}

// Cisco configs exported without a version line
fn cisco_syntax(text: &str) -> bool {
    text.contains("hostname ")
        && (text.contains("interface GigabitEthernet") || text.contains("router ospf"))
}

/// Classify configuration text, or `None` when no rule matches.
pub fn detect_dialect(text: &str) -> Option<Dialect> {
    RULES
        .iter()
        .find(|rule| (rule.matches)(text))
        .map(|rule| rule.dialect)
}
