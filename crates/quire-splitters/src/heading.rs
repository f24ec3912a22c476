//! Heading-guided hierarchical splitting.
//!
//! Sections at the shallowest heading level are greedily packed into chunks
//! under a language-dependent size budget. A single section that exceeds the
//! budget on its own is split further through its sub-headings, falling back
//! to paragraph granularity when it has none.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use quire_core::QuireError;

use crate::language::{LanguageProfile, SizeMetric, DEFAULT_CJK_THRESHOLD};
use crate::sections::{parse_sections, section_stats, subtree_len, Section};
use crate::{SplitWarning, TextSplitter};

static PARAGRAPH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"));

/// Budgets and language threshold for heading-guided splitting.
///
/// Passed explicitly into each splitter; there is no process-wide state, so
/// splitting stays reentrant and testable per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Maximum characters per chunk for CJK documents.
    pub budget_cjk: usize,
    /// Maximum words per chunk for Latin-script documents.
    pub budget_other: usize,
    /// CJK character ratio at or above which a document counts as CJK.
    pub cjk_threshold: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            budget_cjk: 10_000,
            budget_other: 5_000,
            cjk_threshold: DEFAULT_CJK_THRESHOLD,
        }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<(), QuireError> {
        if self.budget_cjk == 0 || self.budget_other == 0 {
            return Err(QuireError::Config("budgets must be non-zero".to_string()));
        }
        if !(0.0..=1.0).contains(&self.cjk_threshold) {
            return Err(QuireError::Config(format!(
                "cjk_threshold must be within [0, 1], got {}",
                self.cjk_threshold
            )));
        }
        Ok(())
    }
}

/// One bounded-size output unit: the titles of the sections folded into it
/// and their concatenated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Section titles folded into this chunk; the first is the chunk's
    /// representative title.
    pub titles: Vec<String>,
    pub content: String,
}

/// Result of heading-guided splitting.
///
/// `catalog` holds one representative title per chunk, in document order, for
/// later reuse by [`CatalogSplitter`](crate::CatalogSplitter) or downstream
/// indexing. `catalog.len() == chunks.len()` by construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingSplit {
    pub chunks: Vec<Chunk>,
    pub catalog: Vec<String>,
    pub warnings: Vec<SplitWarning>,
}

impl HeadingSplit {
    fn empty() -> Self {
        Self {
            chunks: Vec::new(),
            catalog: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

/// Splits Markdown-like text by headings under a size budget.
///
/// The budget is characters for CJK-majority documents and words otherwise;
/// classification happens once per document.
#[derive(Debug, Clone, Default)]
pub struct HeadingSplitter {
    config: SplitConfig,
}

impl HeadingSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override both size budgets.
    pub fn with_budgets(mut self, budget_cjk: usize, budget_other: usize) -> Self {
        self.config.budget_cjk = budget_cjk;
        self.config.budget_other = budget_other;
        self
    }

    /// Override the CJK classification threshold.
    pub fn with_cjk_threshold(mut self, threshold: f64) -> Self {
        self.config.cjk_threshold = threshold;
        self
    }

    /// Build from a validated config.
    pub fn from_config(config: SplitConfig) -> Result<Self, QuireError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Split `text` into size-bounded chunks plus the synthesized catalog.
    ///
    /// Empty or heading-free input yields empty chunks; heading-free input is
    /// additionally reported through [`SplitWarning::NoHeadings`].
    pub fn split(&self, text: &str) -> HeadingSplit {
        if text.trim().is_empty() {
            return HeadingSplit::empty();
        }

        let profile = LanguageProfile::detect_with_threshold(text, self.config.cjk_threshold);
        let budget = if profile.is_cjk {
            self.config.budget_cjk
        } else {
            self.config.budget_other
        };

        let sections = parse_sections(text, profile.metric);
        if sections.is_empty() {
            tracing::warn!("no headings found, heading-guided splitting does not apply");
            return HeadingSplit {
                chunks: Vec::new(),
                catalog: Vec::new(),
                warnings: vec![SplitWarning::NoHeadings],
            };
        }
        tracing::debug!(
            sections = sections.len(),
            is_cjk = profile.is_cjk,
            budget,
            "parsed sections:\n{}",
            section_stats(&sections)
        );

        let mut warnings = Vec::new();
        let chunks = self.pack(&sections, budget, profile.metric, &mut warnings);
        let catalog = chunks
            .iter()
            .map(|c| c.titles.first().cloned().unwrap_or_default())
            .collect();
        tracing::debug!(chunks = chunks.len(), "heading split complete");

        HeadingSplit {
            chunks,
            catalog,
            warnings,
        }
    }

    /// Greedily pack the shallowest-level siblings of `sections` into chunks.
    ///
    /// Strict `>` on the overflow check: a section exactly filling the
    /// remaining budget still joins the current accumulator.
    fn pack(
        &self,
        sections: &[Section],
        budget: usize,
        metric: SizeMetric,
        warnings: &mut Vec<SplitWarning>,
    ) -> Vec<Chunk> {
        let Some(min_level) = sections.iter().map(|s| s.level).min() else {
            return Vec::new();
        };
        // Sections at the shallowest level present are the siblings for this
        // packing pass; deeper sections ride along inside their subtrees.
        let top: Vec<usize> = (0..sections.len())
            .filter(|&i| sections[i].level == min_level)
            .collect();

        let mut out = Vec::new();
        let mut acc_titles: Vec<String> = Vec::new();
        let mut acc_content: Vec<String> = Vec::new();
        let mut acc_size = 0usize;

        for &idx in &top {
            let section = &sections[idx];
            if section.size > budget {
                flush(&mut out, &mut acc_titles, &mut acc_content, &mut acc_size);
                let subtree = &sections[idx..idx + subtree_len(sections, idx)];
                out.extend(self.split_oversized(subtree, budget, metric, warnings));
            } else if acc_size + section.size > budget && !acc_content.is_empty() {
                flush(&mut out, &mut acc_titles, &mut acc_content, &mut acc_size);
                acc_titles.push(section.title.clone());
                acc_content.push(section.full_content.clone());
                acc_size = section.size;
            } else {
                acc_titles.push(section.title.clone());
                acc_content.push(section.full_content.clone());
                acc_size += section.size;
            }
        }
        flush(&mut out, &mut acc_titles, &mut acc_content, &mut acc_size);

        out
    }

    /// Subdivide a section whose full content alone exceeds the budget.
    ///
    /// `subtree` is the section followed by its (possibly empty) run of
    /// deeper sections. With sub-headings present the same packer runs over
    /// them and the parent's title and direct content land on the first
    /// resulting sub-chunk only; without sub-headings the section is split at
    /// paragraph granularity. Recursion terminates because every recursive
    /// call operates on a strictly smaller slice, with paragraphs as the
    /// base case.
    fn split_oversized(
        &self,
        subtree: &[Section],
        budget: usize,
        metric: SizeMetric,
        warnings: &mut Vec<SplitWarning>,
    ) -> Vec<Chunk> {
        let parent = &subtree[0];
        let children = &subtree[1..];
        if children.is_empty() {
            return self.split_paragraphs(parent, budget, metric, warnings);
        }

        let mut chunks = self.pack(children, budget, metric, warnings);
        let header = if parent.direct_content.is_empty() {
            parent.title.clone()
        } else {
            format!("{}\n\n{}", parent.title, parent.direct_content)
        };
        if let Some(first) = chunks.first_mut() {
            first.content = format!("{}\n\n{}", header, first.content);
            first.titles.insert(0, parent.title.clone());
        }
        chunks
    }

    /// Paragraph-granularity fallback for an oversized section without
    /// sub-headings.
    ///
    /// A single paragraph beyond the budget is emitted verbatim and flagged;
    /// character-level splitting would corrupt content. One resulting piece
    /// keeps the section's title, N pieces are labeled `"(Part k)"`.
    fn split_paragraphs(
        &self,
        section: &Section,
        budget: usize,
        metric: SizeMetric,
        warnings: &mut Vec<SplitWarning>,
    ) -> Vec<Chunk> {
        let paragraphs: Vec<&str> = PARAGRAPH_REGEX
            .split(&section.full_content)
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if paragraphs.is_empty() {
            return vec![Chunk {
                titles: vec![section.title.clone()],
                content: section.full_content.clone(),
            }];
        }

        let mut pieces: Vec<String> = Vec::new();
        let mut current: Vec<&str> = Vec::new();
        let mut current_size = 0usize;

        for para in paragraphs {
            let size = metric.measure(para);
            if size > budget {
                if !current.is_empty() {
                    pieces.push(current.join("\n\n"));
                    current.clear();
                    current_size = 0;
                }
                tracing::warn!(
                    title = %section.title,
                    size,
                    budget,
                    "paragraph exceeds budget, emitting verbatim"
                );
                warnings.push(SplitWarning::OversizedParagraph {
                    title: section.title.clone(),
                    size,
                });
                pieces.push(para.to_string());
            } else if current_size + size > budget && !current.is_empty() {
                pieces.push(current.join("\n\n"));
                current = vec![para];
                current_size = size;
            } else {
                current.push(para);
                current_size += size;
            }
        }
        if !current.is_empty() {
            pieces.push(current.join("\n\n"));
        }

        if pieces.len() == 1 {
            let content = pieces.remove(0);
            return vec![Chunk {
                titles: vec![section.title.clone()],
                content,
            }];
        }
        pieces
            .into_iter()
            .enumerate()
            .map(|(k, content)| Chunk {
                titles: vec![format!("{} (Part {})", section.title, k + 1)],
                content,
            })
            .collect()
    }
}

fn flush(
    out: &mut Vec<Chunk>,
    titles: &mut Vec<String>,
    content: &mut Vec<String>,
    size: &mut usize,
) {
    if content.is_empty() {
        return;
    }
    out.push(Chunk {
        titles: std::mem::take(titles),
        content: content.join("\n\n"),
    });
    content.clear();
    *size = 0;
}

impl TextSplitter for HeadingSplitter {
    fn split_text(&self, text: &str) -> Vec<String> {
        self.split(text).chunks.into_iter().map(|c| c.content).collect()
    }
}
