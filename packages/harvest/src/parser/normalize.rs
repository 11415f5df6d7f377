//! Field normalization - whitespace collapsing and character stripping.

use std::sync::LazyLock;

use regex::Regex;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

// Word characters, whitespace, and typical contact/address punctuation
// survive. Everything else - emoji, decorative punctuation, and also
// `$`, `%` and `+` - is stripped.
static RE_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-.,;:@/]+").unwrap());

/// Normalize an extracted field value.
///
/// Single pass, in order: collapse whitespace runs to one space, trim,
/// strip characters outside the safe set, trim again. Stripping can leave
/// adjoining spaces behind; there is no second collapse pass.
pub fn normalize(value: &str) -> String {
    let collapsed = RE_WHITESPACE.replace_all(value, " ");
    let stripped = RE_UNSAFE.replace_all(collapsed.trim(), "");
    stripped.trim().to_string()
}
