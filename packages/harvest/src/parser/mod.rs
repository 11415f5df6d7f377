//! Extraction engine - converts a raw chat message into a structured
//! job-posting candidate.
//!
//! Pure text processing: no I/O, no store access, deterministic and
//! bounded. The engine either produces a [`ParsedPosting`] with a
//! non-empty title or decides the message is not a job posting at all.

mod fields;
pub mod normalize;

pub use normalize::normalize;

/// Lines opening with one of these glyphs are decoration, not a title.
const DECORATIVE_PREFIXES: &[&str] = &["🔍", "💼", "📍", "💰", "📱", "✉️"];

/// Fallback titles longer than this get truncated.
const MAX_TITLE_CHARS: usize = 100;

/// Characters kept before the ellipsis when truncating.
const TRUNCATED_TITLE_CHARS: usize = 97;

/// Output of the extraction engine, before persistence metadata is
/// attached.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPosting {
    /// Short human-readable label; never empty
    pub title: String,

    /// Verbatim source text of the whole message
    pub description: String,

    pub company: Option<String>,
    pub salary: Option<String>,
    pub location: Option<String>,
    pub requirements: Option<String>,
    pub contact: Option<String>,
}

/// Extract a structured posting from raw message text.
///
/// Returns `None` when no title can be determined - the "not a job
/// posting" signal. Title detection and labeled-field extraction run
/// independently over the same lines, so a labeled line can double as
/// the title.
pub fn extract(text: &str) -> Option<ParsedPosting> {
    let lines: Vec<&str> = text.split('\n').collect();

    let title = lines
        .iter()
        .map(|line| line.trim())
        .find(|line| !line.is_empty() && !starts_decorated(line))
        .map(normalize)
        .filter(|title| !title.is_empty())
        .or_else(|| fallback_title(text))?;

    Some(ParsedPosting {
        title,
        description: text.to_string(),
        company: field(&lines, &fields::RE_COMPANY),
        salary: field(&lines, &fields::RE_SALARY),
        location: field(&lines, &fields::RE_LOCATION),
        requirements: field(&lines, &fields::RE_REQUIREMENTS),
        contact: field(&lines, &fields::RE_CONTACT),
    })
}

fn field(lines: &[&str], pattern: &regex::Regex) -> Option<String> {
    fields::first_labeled_value(lines, pattern)
        .map(|value| normalize(&value))
        .filter(|value| !value.is_empty())
}

fn starts_decorated(line: &str) -> bool {
    DECORATIVE_PREFIXES
        .iter()
        .any(|glyph| line.starts_with(glyph))
}

/// Derive a title from the first line of the raw text.
///
/// The truncation boundary is computed on the verbatim line, before any
/// character stripping; the truncated candidate then goes through the
/// same normalization pass as detected titles. A first line that strips
/// to nothing yields no title.
fn fallback_title(text: &str) -> Option<String> {
    let first_line = text.split('\n').next().unwrap_or_default().trim();
    let title = normalize(&truncate_line(first_line));
    (!title.is_empty()).then_some(title)
}

/// Cut a line to at most [`MAX_TITLE_CHARS`] characters, marking the cut
/// with three dots.
fn truncate_line(line: &str) -> String {
    if line.chars().count() <= MAX_TITLE_CHARS {
        return line.to_string();
    }

    let head: String = line.chars().take(TRUNCATED_TITLE_CHARS).collect();
    format!("{head}...")
}
