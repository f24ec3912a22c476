//! Catalog-guided splitting: cut a flat document at the first occurrence of
//! each externally supplied chapter title.

use serde::{Deserialize, Serialize};

use quire_core::QuireError;

use crate::{SplitWarning, TextSplitter};

/// Result of catalog-guided splitting.
///
/// `chapters` is ordered by catalog index. Titles that could not be located
/// are skipped, so `chapters.len()` may fall short of the catalog length;
/// each miss is reported through [`SplitWarning::TitleNotFound`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogSplit {
    pub chapters: Vec<String>,
    pub warnings: Vec<SplitWarning>,
}

/// Splits a document using a pre-extracted, ordered catalog of chapter
/// titles located by exact text search.
///
/// No size budget applies here; chunk granularity is exactly what the
/// catalog dictates.
#[derive(Debug, Clone)]
pub struct CatalogSplitter {
    catalog: Vec<String>,
}

impl CatalogSplitter {
    pub fn new(catalog: Vec<String>) -> Self {
        Self { catalog }
    }

    /// Build from newline-delimited catalog text, the sidecar format the
    /// surrounding pipeline persists. Lines are trimmed; blank lines are
    /// dropped.
    pub fn from_text(catalog_text: &str) -> Result<Self, QuireError> {
        let catalog: Vec<String> = catalog_text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if catalog.is_empty() {
            return Err(QuireError::Catalog("catalog has no titles".to_string()));
        }
        Ok(Self::new(catalog))
    }

    pub fn catalog(&self) -> &[String] {
        &self.catalog
    }

    /// Partition `text` into chapters at the catalog's title positions.
    ///
    /// Boundary detection uses in-text order of the located titles; the
    /// returned chapters are re-sorted to catalog order. Zero located titles
    /// yields an empty chapter list.
    pub fn split(&self, text: &str) -> CatalogSplit {
        let mut warnings = Vec::new();
        if text.trim().is_empty() || self.catalog.is_empty() {
            return CatalogSplit {
                chapters: Vec::new(),
                warnings,
            };
        }

        // (catalog index, byte offset) for every title actually present.
        let mut found: Vec<(usize, usize)> = Vec::new();
        for (i, title) in self.catalog.iter().enumerate() {
            match find_line_anchored(text, title) {
                Some(pos) => found.push((i, pos)),
                None => {
                    tracing::warn!(title = %title, "catalog title not found in document");
                    warnings.push(SplitWarning::TitleNotFound {
                        title: title.clone(),
                    });
                }
            }
        }
        if found.is_empty() {
            return CatalogSplit {
                chapters: Vec::new(),
                warnings,
            };
        }

        // Catalog order and in-text order may legitimately differ; offsets
        // determine the split points, the catalog index the output order.
        found.sort_by_key(|&(_, pos)| pos);

        let mut chapters: Vec<(usize, String)> = Vec::with_capacity(found.len());
        for (j, &(catalog_idx, start)) in found.iter().enumerate() {
            let end = found
                .get(j + 1)
                .map(|&(_, next_start)| next_start)
                .unwrap_or(text.len());
            chapters.push((catalog_idx, text[start..end].trim().to_string()));
        }
        chapters.sort_by_key(|&(catalog_idx, _)| catalog_idx);

        CatalogSplit {
            chapters: chapters.into_iter().map(|(_, content)| content).collect(),
            warnings,
        }
    }
}

/// First occurrence of `title` as a complete line: preceded by start-of-text
/// or a newline, followed by a newline or end-of-text. Titles are matched
/// literally, never as patterns.
fn find_line_anchored(text: &str, title: &str) -> Option<usize> {
    if title.is_empty() {
        return None;
    }
    let bytes = text.as_bytes();
    for (pos, _) in text.match_indices(title) {
        let at_line_start = pos == 0 || bytes[pos - 1] == b'\n';
        let end = pos + title.len();
        let at_line_end = end == text.len() || bytes[end] == b'\n';
        if at_line_start && at_line_end {
            return Some(pos);
        }
    }
    None
}

impl TextSplitter for CatalogSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        self.split(text).chapters
    }
}
