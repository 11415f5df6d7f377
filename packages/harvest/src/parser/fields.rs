//! Labeled-line field patterns.
//!
//! Each target field has a fixed set of label synonyms, matched
//! case-insensitively as whole words immediately followed by a colon; the
//! captured value runs from after the colon to the end of the line. The
//! synonym sets carry both English labels and the Russian labels common in
//! the source channels. Each pattern is checked per line, so no single
//! combined alternation ever scans the whole message.

use std::sync::LazyLock;

use regex::Regex;

pub(super) static RE_SALARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:salary|pay|income|comp|зарплата|оплата|доход|зп):\s*(.+)").unwrap()
});

pub(super) static RE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:location|place|city|локация|место|город):\s*(.+)").unwrap()
});

pub(super) static RE_COMPANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:company|organization|компания|организация):\s*(.+)").unwrap()
});

pub(super) static RE_CONTACT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:contact|telegram|tg|контакт|связь):\s*(.+)").unwrap()
});

pub(super) static RE_REQUIREMENTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:requirements|skills|experience|требования|навыки|скиллы|опыт):\s*(.+)")
        .unwrap()
});

/// First matching labeled value across the lines, top to bottom.
///
/// Repeated labels are not aggregated; the first occurrence wins.
pub(super) fn first_labeled_value(lines: &[&str], pattern: &Regex) -> Option<String> {
    lines
        .iter()
        .find_map(|line| pattern.captures(line).map(|caps| caps[1].to_string()))
}
