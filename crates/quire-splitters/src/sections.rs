//! Heading parsing: raw Markdown-like text into a flat, ordered `Section` list.
//!
//! All packing and recursion logic downstream operates on these records and
//! never re-parses raw text.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::language::SizeMetric;

static HEADING_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#{1,6})[ \t]+(.+)$").expect("valid heading regex"));

/// One heading and its associated content spans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Full heading line including the `#` marker prefix.
    pub title: String,
    /// Nesting depth: the number of marker characters.
    pub level: usize,
    /// Text strictly between this heading and the next heading of any level.
    pub direct_content: String,
    /// Text from this heading through the end of its subtree (up to the next
    /// heading at the same or shallower level).
    pub full_content: String,
    /// Size of `full_content` under the document's active metric.
    pub size: usize,
}

/// Parse `text` into an ordered flat list of sections, measuring each
/// section's full content with `metric`.
///
/// Returns an empty list when no headings are found; callers must treat that
/// as "heading-guided splitting does not apply".
pub fn parse_sections(text: &str, metric: SizeMetric) -> Vec<Section> {
    let matches: Vec<(usize, usize, usize, &str)> = HEADING_REGEX
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let level = cap.get(1)?.as_str().len();
            let heading_text = cap.get(2)?.as_str();
            Some((whole.start(), whole.end(), level, heading_text))
        })
        .collect();

    let mut sections = Vec::with_capacity(matches.len());
    for (i, &(start, line_end, level, heading_text)) in matches.iter().enumerate() {
        let title = format!("{} {}", "#".repeat(level), heading_text.trim());

        // Full span ends at the next heading of the same or shallower level.
        let full_end = matches[i + 1..]
            .iter()
            .find(|&&(_, _, next_level, _)| next_level <= level)
            .map(|&(next_start, _, _, _)| next_start)
            .unwrap_or(text.len());

        // Direct content ends at the very next heading, whatever its level.
        let direct_end = matches
            .get(i + 1)
            .map(|&(next_start, _, _, _)| next_start)
            .unwrap_or(text.len());

        let direct_content = text[line_end..direct_end].trim().to_string();
        let full_content = text[start..full_end].trim().to_string();
        let size = metric.measure(&full_content);

        sections.push(Section {
            title,
            level,
            direct_content,
            full_content,
            size,
        });
    }

    sections
}

/// Length of the subtree rooted at `sections[idx]`: the contiguous run of
/// strictly deeper sections immediately following it, plus the root itself.
pub(crate) fn subtree_len(sections: &[Section], idx: usize) -> usize {
    let level = sections[idx].level;
    let deeper = sections[idx + 1..]
        .iter()
        .take_while(|s| s.level > level)
        .count();
    1 + deeper
}

/// Per-section size statistics, indented by nesting level. One line per
/// section, `"{title}: {size}"`.
pub fn section_stats(sections: &[Section]) -> String {
    let mut out = String::new();
    for section in sections {
        let indent = "  ".repeat(section.level.saturating_sub(1));
        out.push_str(&indent);
        out.push_str(&section.title);
        out.push_str(": ");
        out.push_str(&section.size.to_string());
        out.push('\n');
    }
    out
}
