mod catalog;
mod heading;
pub mod language;
mod sections;

pub use catalog::{CatalogSplit, CatalogSplitter};
pub use heading::{Chunk, HeadingSplit, HeadingSplitter, SplitConfig};
pub use language::{LanguageProfile, SizeMetric};
pub use sections::{parse_sections, section_stats, Section};

// Re-export core types used in splitter signatures.
pub use quire_core::{Document, QuireError};

use std::fmt;

use serde::{Deserialize, Serialize};

/// Non-fatal data-quality conditions surfaced alongside split results.
///
/// Splitters never fail on bad documents; they return partial or empty
/// results plus these diagnostics, so a batch caller can log and move on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SplitWarning {
    /// The heading parser found no headings in a non-empty document.
    NoHeadings,
    /// A catalog title's exact text is absent from the document.
    TitleNotFound { title: String },
    /// A single paragraph exceeds the budget on its own and was emitted
    /// verbatim rather than truncated.
    OversizedParagraph { title: String, size: usize },
}

impl fmt::Display for SplitWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitWarning::NoHeadings => write!(f, "no headings found"),
            SplitWarning::TitleNotFound { title } => {
                write!(f, "catalog title not found: {title}")
            }
            SplitWarning::OversizedParagraph { title, size } => {
                write!(f, "oversized paragraph in '{title}' ({size})")
            }
        }
    }
}

/// Trait for splitting text into chunks.
pub trait TextSplitter: Send + Sync {
    /// Split a string into chunks.
    fn split_text(&self, text: &str) -> Vec<String>;

    /// Split documents by splitting each document's content and producing
    /// new documents for each chunk. Metadata is preserved on each chunk.
    fn split_documents(&self, docs: Vec<Document>) -> Vec<Document> {
        let mut result = Vec::new();
        for doc in docs {
            let chunks = self.split_text(&doc.content);
            for (i, chunk) in chunks.into_iter().enumerate() {
                let mut metadata = doc.metadata.clone();
                metadata.insert(
                    "chunk_index".to_string(),
                    serde_json::Value::Number(i.into()),
                );
                result.push(Document::with_metadata(
                    format!("{}-chunk-{i}", doc.id),
                    chunk,
                    metadata,
                ));
            }
        }
        result
    }
}
