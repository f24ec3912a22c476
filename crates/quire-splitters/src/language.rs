//! Language classification and size metrics.
//!
//! A document is measured either in characters (CJK-majority text) or in
//! words (Latin-script text). Classification happens once per document and
//! the chosen metric is used consistently by all downstream budgeting.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default ratio of CJK characters above which a document counts as CJK.
pub const DEFAULT_CJK_THRESHOLD: f64 = 0.3;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-zA-Z0-9]+").expect("valid word regex"));

/// How to measure the size of a text span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeMetric {
    /// Character count excluding spaces, newlines, and tabs. Used for CJK text.
    Chars,
    /// Count of maximal ASCII alphanumeric runs. Used for Latin-script text.
    Words,
}

impl SizeMetric {
    /// Measure `text` under this metric.
    pub fn measure(&self, text: &str) -> usize {
        match self {
            SizeMetric::Chars => count_chars(text),
            SizeMetric::Words => count_words(text),
        }
    }
}

/// The per-document language decision: whether the text is CJK-majority and
/// which size metric applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageProfile {
    pub is_cjk: bool,
    pub metric: SizeMetric,
}

impl LanguageProfile {
    /// Classify `text` with the default CJK threshold.
    pub fn detect(text: &str) -> Self {
        Self::detect_with_threshold(text, DEFAULT_CJK_THRESHOLD)
    }

    /// Classify `text`, marking it CJK when the ratio of CJK characters over
    /// all non-space, non-newline characters reaches `threshold`.
    pub fn detect_with_threshold(text: &str, threshold: f64) -> Self {
        let cjk = is_cjk(text, threshold);
        Self {
            is_cjk: cjk,
            metric: if cjk {
                SizeMetric::Chars
            } else {
                SizeMetric::Words
            },
        }
    }
}

/// Whether `text` is predominantly CJK.
///
/// Counts characters in the CJK Unified Ideographs block plus CJK punctuation
/// and fullwidth forms, over all characters excluding plain spaces and
/// newlines. Empty text is never CJK.
pub fn is_cjk(text: &str, threshold: f64) -> bool {
    if text.is_empty() {
        return false;
    }
    let mut cjk = 0usize;
    let mut total = 0usize;
    for c in text.chars() {
        if c == ' ' || c == '\n' {
            continue;
        }
        total += 1;
        if is_cjk_char(c) {
            cjk += 1;
        }
    }
    if total == 0 {
        return false;
    }
    cjk as f64 / total as f64 >= threshold
}

fn is_cjk_char(c: char) -> bool {
    matches!(c,
        '\u{4e00}'..='\u{9fff}'    // CJK Unified Ideographs
        | '\u{3000}'..='\u{303f}'  // CJK symbols and punctuation
        | '\u{ff00}'..='\u{ffef}') // halfwidth and fullwidth forms
}

/// Character count with spaces, newlines, and tabs stripped.
pub fn count_chars(text: &str) -> usize {
    text.chars()
        .filter(|c| !matches!(c, ' ' | '\n' | '\t'))
        .count()
}

/// Word count: maximal runs of ASCII letters/digits. No stemming, no Unicode
/// word-breaking for non-Latin scripts.
pub fn count_words(text: &str) -> usize {
    WORD_REGEX.find_iter(text).count()
}
