//! Search query extraction from free-form model replies.
//!
//! Local models rarely follow "return only the query" to the letter. The
//! extractor prefers an explicit `**Query:**` marker and otherwise takes
//! the first line of the reply.

use std::sync::LazyLock;

use regex::Regex;

/// Matches `**Query:** <value>`; the capture stops at the end of the line.
static QUERY_MARKER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\*\*Query:\*\*\s*(.*)").ok());

/// Reduces a model reply to a single search query line.
///
/// Returns the trimmed value after the first `**Query:**` marker, or the
/// first non-empty line of the reply when no usable marker exists. An empty
/// or whitespace-only reply yields an empty string.
#[must_use]
pub fn extract_query(raw: &str) -> String {
    let marked = QUERY_MARKER
        .as_ref()
        .and_then(|re| re.captures(raw))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty());

    if let Some(value) = marked {
        return value.to_string();
    }

    raw.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or_default()
        .to_string()
}
