use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A document with content and metadata, used throughout the splitting pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub metadata: HashMap<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(
        id: impl Into<String>,
        content: impl Into<String>,
        metadata: HashMap<String, Value>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            metadata,
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Unified error type for Quire.
///
/// Data-quality problems in documents (missing titles, oversized paragraphs)
/// are never errors: splitters report those through warning values in their
/// output so one bad document cannot abort a batch. This enum covers genuine
/// misuse only.
#[derive(Debug, Error)]
pub enum QuireError {
    #[error("config error: {0}")]
    Config(String),
    #[error("catalog error: {0}")]
    Catalog(String),
    #[error("splitter error: {0}")]
    Splitter(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_roundtrips_through_json() {
        let mut metadata = HashMap::new();
        metadata.insert("source".to_string(), Value::String("book.md".to_string()));
        let doc = Document::with_metadata("doc-1", "hello", metadata);

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn empty_metadata_is_skipped_in_json() {
        let doc = Document::new("doc-1", "hello");
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("metadata"));
    }

    #[test]
    fn error_messages_carry_context() {
        let err = QuireError::Config("budget must be non-zero".to_string());
        assert_eq!(err.to_string(), "config error: budget must be non-zero");
    }
}
